pub mod load;
pub mod model;
pub mod printer;
pub mod validate;

pub use model::{Edge, NodeIndex, NodeType, Rank, SummaryValue, TaxonomyDataset, TaxonomyNode};
pub use printer::{OutlineConfig, render_outline};
pub use validate::{ValidatedTaxonomy, Violation};
pub use whaletree_error::{Error, ErrorKind, Result};
