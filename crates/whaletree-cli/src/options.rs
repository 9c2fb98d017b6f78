//! Shared CLI options for whaletree tools.
//!
//! The option groups here are flattened into both the `whaletree` binary and
//! the `args:` line of `whaletree-test` corpus cases, so the two always
//! accept the same flags.

use clap::{Args, ValueEnum};

/// Which transformation to run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Flattened chart dataset as JSON
    #[default]
    Chart,
    /// Collapsible HTML tree view
    TreeView,
    /// Indented text outline
    Outline,
}

/// Options for the chart dataset.
#[derive(Args, Debug, Clone, Default)]
pub struct ChartArgs {
    /// Keep species as chart points (labelled "Name - Common name").
    #[arg(long = "include-species")]
    pub include_species: bool,
}

/// Options for the HTML tree view.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeViewArgs {
    /// Path prefix for species detail links.
    #[arg(long = "detail-prefix", value_name = "PATH")]
    pub detail_prefix: Option<String>,

    /// Class list for the outer tree view container.
    #[arg(long = "container-class", value_name = "CLASS")]
    pub container_class: Option<String>,
}

/// Options for the text outline.
#[derive(Args, Debug, Clone, Default)]
pub struct OutlineArgs {
    /// Print node ids next to labels.
    #[arg(long = "show-ids")]
    pub show_ids: bool,

    /// Stop the outline at genus level.
    #[arg(long = "hide-species")]
    pub hide_species: bool,
}

/// Everything that decides what gets rendered from a loaded dataset.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Chart)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub chart: ChartArgs,

    #[command(flatten)]
    pub tree_view: TreeViewArgs,

    #[command(flatten)]
    pub outline: OutlineArgs,

    /// Render without checking the dataset first.
    #[arg(long = "skip-validation")]
    pub skip_validation: bool,
}

impl ChartArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_species(mut self, include: bool) -> Self {
        self.include_species = include;
        self
    }
}

impl TreeViewArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.detail_prefix = Some(prefix.into());
        self
    }

    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }
}

impl RenderArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_chart(mut self, chart: ChartArgs) -> Self {
        self.chart = chart;
        self
    }

    pub fn with_tree_view(mut self, tree_view: TreeViewArgs) -> Self {
        self.tree_view = tree_view;
        self
    }

    pub fn with_skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }
}
