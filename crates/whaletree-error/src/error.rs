//! The error value shared by every whaletree crate.

use std::fmt;

use crate::ErrorKind;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed whaletree operation.
///
/// `operation` names the step that failed (`core::load`, `core::validate`,
/// ...). `context` holds ordered key/value pairs such as the offending node id
/// or file path; keys may repeat.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<BoxedSource>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// First value recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v.as_str()))
    }

    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Record the failing step. An operation set earlier is kept in context
    /// under `called`.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the underlying error. Setting it twice is a bug.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }

    fn write_context(&self, f: &mut fmt::Formatter<'_>, separator: &str) -> fmt::Result {
        for (i, (key, value)) in self.context.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

/// One line: `Kind at operation [key: value, ...] => message`.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.operation)?;
        if !self.context.is_empty() {
            f.write_str(" [")?;
            self.write_context(f, ", ")?;
            f.write_str("]")?;
        }
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;
        if !self.message.is_empty() {
            writeln!(f, "    {}", self.message)?;
        }
        if !self.context.is_empty() {
            f.write_str("    ")?;
            self.write_context(f, "\n    ")?;
            writeln!(f)?;
        }
        if let Some(source) = &self.source {
            writeln!(f, "    caused by: {source:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }

    pub fn deserialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializationFailed, message)
    }

    /// One broken tree invariant. `violation` is a kebab-case tag such as
    /// `dangling-parent`; `node` is the id the check tripped on, or empty.
    pub fn invalid_dataset(
        violation: &'static str,
        node: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidDataset, message)
            .with_context("violation", violation)
            .with_context("node", node)
    }

    pub fn cycle_detected(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorKind::CycleDetected,
            format!("corrupt taxonomy: cycle detected at '{id}'"),
        )
        .with_context("node", id)
    }
}
