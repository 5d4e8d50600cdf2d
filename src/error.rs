//! Error types for the side-effecting edges of Hanbox.
//!
//! The text formatters never fail; only preference writes and file exports
//! can, and callers log those rather than surfacing them to the user.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HanboxError {
    /// Browser storage is unavailable or rejected the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// The environment could not emit the export file
    #[error("Export error: {0}")]
    Export(String),
}

impl HanboxError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<std::io::Error> for HanboxError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for HanboxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<gloo_storage::errors::StorageError> for HanboxError {
    fn from(err: gloo_storage::errors::StorageError) -> Self {
        Self::storage(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HanboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: HanboxError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn json_errors_convert_with_format() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HanboxError = parse_err.into();
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }
}
