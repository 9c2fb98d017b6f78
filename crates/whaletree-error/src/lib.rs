//! # whaletree-error
//!
//! Unified error handling for whaletree.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidDataset`, `CycleDetected`)
//! - **Context**: key/value pairs pointing at the offending node, file or option
//! - **Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use whaletree_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidDataset, "parent does not resolve")
//!         .with_operation("core::validate")
//!         .with_context("violation", "dangling-parent")
//!         .with_context("node", "megaptera"))
//! }
//! ```
//!
//! Library functions return `Result<T, whaletree_error::Error>`. External
//! errors are wrapped with `set_source(err)`; callers further up only append
//! context.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using whaletree Error
pub type Result<T> = std::result::Result<T, Error>;
