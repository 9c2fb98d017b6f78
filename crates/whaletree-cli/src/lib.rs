//! whaletree command-line interface.
//!
pub mod config;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::{Path, PathBuf};

use whaletree_collect::ChartOptions;
use whaletree_core::{OutlineConfig, Result};
use whaletree_html::TreeViewOptions;

pub use config::{ChartConfig, TreeViewConfig, WhaletreeConfig};
pub use options::{ChartArgs, OutlineArgs, OutputFormat, RenderArgs, TreeViewArgs};
pub use output::{generate_output, write_output};
pub use pipeline::{load_dataset, process_dataset, validate_dataset};

/// Options for running whaletree, with CLI flags and config already merged.
#[derive(Debug, Clone)]
pub struct WhaletreeOptions {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub chart: ChartOptions,
    pub tree_view: TreeViewOptions,
    pub outline: OutlineConfig,
    pub skip_validation: bool,
}

impl WhaletreeOptions {
    /// Flags win over the config file, which wins over defaults.
    pub fn resolve(input: impl Into<PathBuf>, args: &RenderArgs, config: &WhaletreeConfig) -> Self {
        let include_species =
            args.chart.include_species || config.chart.include_species.unwrap_or(false);

        let mut tree_view = TreeViewOptions::default();
        if let Some(prefix) = args
            .tree_view
            .detail_prefix
            .as_ref()
            .or(config.tree_view.detail_path_prefix.as_ref())
        {
            tree_view = tree_view.with_detail_prefix(prefix.as_str());
        }
        if let Some(class) = args
            .tree_view
            .container_class
            .as_ref()
            .or(config.tree_view.container_class.as_ref())
        {
            tree_view = tree_view.with_container_class(class.as_str());
        }

        let outline = OutlineConfig::new()
            .with_ids(args.outline.show_ids)
            .with_species(!args.outline.hide_species);

        Self {
            input: input.into(),
            format: args.format,
            chart: ChartOptions::new().with_species(include_species),
            tree_view,
            outline,
            skip_validation: args.skip_validation,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

/// Main entry point: load, validate, render.
pub fn run_main(opts: &WhaletreeOptions) -> Result<String> {
    let dataset = load_dataset(opts.input())?;
    process_dataset(opts, dataset)
}
