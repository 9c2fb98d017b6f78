//! Tree view rendering for producing collapsible HTML.
//!
//! The taxonomy is walked from its `order` root and written as nested
//! accordion markup. Interior nodes become expandable items, nodes without
//! resolvable children become leaves, and species leaves link to a detail
//! page.
//!
//! # Module Structure
//!
//! - [`html`]: HTML escaping and the line-oriented builder
//! - [`style`]: Per-rank icons and colors
//! - `render`: The recursive renderer

pub mod html;
mod render;
pub mod style;

pub use html::{HtmlBuilder, escape_attr, escape_text};
pub use render::{TreeViewOptions, render_tree_view, render_tree_view_with_options};
pub use style::{NodeIcon, SPECIES_SVG, color_for, icon_for};
