//! Error types shared by every geometry operation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised by vectors, matrices, meshes and borders.
///
/// Every operation validates its input before mutating anything, so an
/// object that returned one of these is still in its last valid state.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A value is not of the expected kind (a non-finite number, a
    /// malformed token, a triangle point with the wrong arity).
    #[error("type error: {message}")]
    Type {
        /// Description of what was rejected.
        message: String,
    },

    /// A collection is shorter than the dimension it has to fill.
    #[error("length error: expected at least {expected} elements, got {found}")]
    Length {
        /// Minimum number of elements required.
        expected: usize,
        /// Number of elements supplied.
        found: usize,
    },

    /// A file path does not carry the required extension.
    #[error("extension error: {path} does not end in .{expected}")]
    Extension {
        /// Offending path.
        path: PathBuf,
        /// Extension that was required.
        expected: &'static str,
    },

    /// A number is outside the domain of the operation.
    #[error("value error: {message}")]
    Value {
        /// Description of the violated constraint.
        message: String,
    },

    /// Division by zero.
    #[error("division by zero")]
    Division,

    /// An index is out of range.
    #[error("index {index} out of range for length {len}")]
    Index {
        /// Requested index.
        index: usize,
        /// Number of valid positions.
        len: usize,
    },

    /// A record of a mesh file failed to parse.
    #[error("line {line}: {source}")]
    Record {
        /// 1-based line number.
        line: usize,
        /// Underlying failure.
        #[source]
        source: Box<GeometryError>,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeometryError {
    /// Create a `Type` error with the given message.
    #[must_use]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }

    /// Create a `Value` error with the given message.
    #[must_use]
    pub fn value_error(message: impl Into<String>) -> Self {
        Self::Value {
            message: message.into(),
        }
    }

    /// Attach the line number of a mesh file record.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        Self::Record {
            line,
            source: Box::new(self),
        }
    }

    /// The error with any `Record` wrapping removed.
    pub fn root(&self) -> &GeometryError {
        match self {
            Self::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wraps_and_unwraps() {
        let err = GeometryError::Index { index: 7, len: 3 }.at_line(12);
        assert_eq!(err.to_string(), "line 12: index 7 out of range for length 3");
        assert!(matches!(err.root(), GeometryError::Index { index: 7, len: 3 }));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GeometryError = io.into();
        assert!(matches!(err, GeometryError::Io(_)));
    }
}
