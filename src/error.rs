//! Error types for acadtags library

use std::io;
use thiserror::Error;

/// Main error type for acadtags operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred during stream operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported DXF version for the requested operation
    #[error("Unsupported DXF version: {0:?}")]
    UnsupportedVersion(String),

    /// Error parsing the tag stream
    #[error("Parse error: {0}")]
    Parse(String),

    /// Attribute name not declared by the entity schema
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Two subclass schemas declare the same attribute name
    #[error("Attribute '{name}' declared by both {first} and {second}")]
    SchemaConflict {
        name: String,
        first: String,
        second: String,
    },

    /// A value cannot be coerced to the declared attribute type
    #[error("Invalid value for '{name}' (code {code}): expected {expected}, got {actual}")]
    InvalidValue {
        name: String,
        code: i32,
        expected: &'static str,
        actual: String,
    },

    /// Decoded binary data does not match its declared length
    #[error("Binary data length mismatch: declared {declared} bytes, decoded {actual}")]
    BinaryLength { declared: usize, actual: usize },

    /// Invalid hex string in a binary data tag
    #[error("Invalid hex data: {0}")]
    InvalidHex(String),

    /// Corrupt or truncated proxy graphic data
    #[error("Proxy graphic error at offset {offset}: {message}")]
    ProxyGraphic { offset: usize, message: String },

    /// Entity cannot be exported for the target version
    #[error("{entity} requires {required} or later, target is {target}")]
    ExportVersion {
        entity: String,
        required: &'static str,
        target: &'static str,
    },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl DxfError {
    /// Build an [`DxfError::InvalidValue`] for a rejected attribute value.
    pub fn invalid_value(
        name: impl Into<String>,
        code: i32,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        DxfError::InvalidValue {
            name: name.into(),
            code,
            expected,
            actual: actual.into(),
        }
    }
}

/// Result type alias for acadtags operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DxfError::UnsupportedVersion("AC1009".to_string());
        assert_eq!(err.to_string(), "Unsupported DXF version: \"AC1009\"");
    }

    #[test]
    fn test_binary_length_error() {
        let err = DxfError::BinaryLength {
            declared: 968,
            actual: 967,
        };
        assert!(err.to_string().contains("968"));
        assert!(err.to_string().contains("967"));
    }

    #[test]
    fn test_schema_conflict_display() {
        let err = DxfError::SchemaConflict {
            name: "layer".to_string(),
            first: "AcDbEntity".to_string(),
            second: "AcDbLine".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Attribute 'layer' declared by both AcDbEntity and AcDbLine"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let dxf_err: DxfError = io_err.into();
        assert!(matches!(dxf_err, DxfError::Io(_)));
    }
}
