//! Plain-text outline of the taxonomy, for debugging datasets on a terminal.
//!
//! ```text
//! order Cetacea - Whales, dolphins and porpoises [13 species]
//!   suborder Mysticeti - Baleen whales [7 species]
//!     family Balaenidae - Right whales and bowhead [3 species]
//! ```

use std::collections::HashSet;
use std::fmt::Write;

use crate::model::{NodeIndex, TaxonomyNode};

/// Options for [`render_outline`].
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Append `(id)` after each label
    pub include_ids: bool,

    /// Include species leaves
    pub include_species: bool,

    /// Nesting deeper than this is elided with `...`
    pub max_depth: usize,

    /// Indentation width in spaces per nesting level
    pub indent_width: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        OutlineConfig {
            include_ids: false,
            include_species: true,
            max_depth: 32,
            indent_width: 2,
        }
    }
}

impl OutlineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(mut self, enabled: bool) -> Self {
        self.include_ids = enabled;
        self
    }

    pub fn with_species(mut self, enabled: bool) -> Self {
        self.include_species = enabled;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

/// Render the tree under the first `order` node as an indented outline.
///
/// Missing root gives an empty string. Unresolved children are skipped and
/// a node met again on its own ancestor path is printed as `<cycle: id>`.
pub fn render_outline(nodes: &[TaxonomyNode], config: &OutlineConfig) -> String {
    let index = NodeIndex::new(nodes);
    let Some(root) = index.root() else {
        return String::new();
    };

    let mut printer = OutlinePrinter {
        index: &index,
        config,
        output: String::new(),
        visiting: HashSet::new(),
    };
    printer.print_node(root, 0);
    printer.output
}

struct OutlinePrinter<'a, 'n> {
    index: &'a NodeIndex<'n>,
    config: &'a OutlineConfig,
    output: String,
    visiting: HashSet<&'n str>,
}

impl<'n> OutlinePrinter<'_, 'n> {
    fn print_node(&mut self, node: &'n TaxonomyNode, depth: usize) {
        if depth > self.config.max_depth {
            self.indent(depth);
            self.output.push_str("...\n");
            return;
        }
        if !self.visiting.insert(node.id.as_str()) {
            self.indent(depth);
            let _ = writeln!(self.output, "<cycle: {}>", node.id);
            return;
        }

        self.indent(depth);
        let _ = write!(self.output, "{} {}", node.node_type, node.display_name());
        if self.config.include_ids {
            let _ = write!(self.output, " ({})", node.id);
        }
        if let Some(common) = node.common_name() {
            let _ = write!(self.output, " - {common}");
        }
        if let Some(count) = node.species_badge() {
            let _ = write!(self.output, " [{count} species]");
        }
        self.output.push('\n');

        let index = self.index;
        for child in index.children_of(node) {
            if child.is_species() && !self.config.include_species {
                continue;
            }
            self.print_node(child, depth + 1);
        }

        self.visiting.remove(node.id.as_str());
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth * self.config.indent_width {
            self.output.push(' ');
        }
    }
}
