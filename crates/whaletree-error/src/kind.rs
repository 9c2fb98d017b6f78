//! Error kinds for whaletree operations

use strum_macros::{Display, IntoStaticStr};

/// What went wrong.
///
/// Callers match on the kind; the message and context carry the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    FileNotFound,
    PermissionDenied,
    /// Any other I/O failure
    IoFailed,

    /// Output could not be encoded as JSON
    SerializationFailed,
    /// The dataset is not well-formed JSON or does not match the node schema
    DeserializationFailed,

    /// The dataset breaks one of the tree invariants (see the `violation` context)
    InvalidDataset,
    /// The parent/children relation loops back on itself
    CycleDetected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
