//! Engine error types

use dgml_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Document model or renderer error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Options that cannot be honoured together
    #[error("configuration conflict: {0}")]
    ConfigurationConflict(String),

    /// An option value outside its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding error (UTF-8, etc.)
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_converts() {
        let err: EngineError = CoreError::Parse("bad".to_string()).into();
        assert!(matches!(err, EngineError::Core(CoreError::Parse(_))));
        assert_eq!(err.to_string(), "core error: XML parse error: bad");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xml");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
