//! Error handling for the CLI application

use dgml_engine::EngineError;
use std::error::Error;
use std::fmt;

/// Failures the `dgml` binary reports to the user
#[derive(Debug)]
pub enum CliError {
    /// No input file matched, or a named file is missing
    FileNotFound(String),
    /// A glob pattern could not be compiled
    InvalidPattern(String),
    /// A config file or flag combination the engine rejects
    ConfigError(String),
    /// The engine could not parse or segment one input document
    ChunkingFailed {
        /// Input file being chunked
        path: String,
        /// Underlying engine failure
        source: EngineError,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ChunkingFailed { path, .. } => write!(f, "Failed to chunk {path}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::ChunkingFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("contract.xml".to_string());
        assert_eq!(error.to_string(), "File not found: contract.xml");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("unknown table style".to_string());
        assert_eq!(error.to_string(), "Configuration error: unknown table style");
    }

    #[test]
    fn test_chunking_failure_keeps_engine_cause() {
        let error = CliError::ChunkingFailed {
            path: "lease.xml".to_string(),
            source: EngineError::Io("permission denied".to_string()),
        };
        assert_eq!(error.to_string(), "Failed to chunk lease.xml");
        let cause = error.source().unwrap();
        assert!(cause.to_string().contains("permission denied"));

        let chained = format!("{:#}", anyhow::Error::from(error));
        assert!(chained.contains("Failed to chunk lease.xml: "));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let result: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert_eq!(err.to_string(), "Configuration error: bad");
    }

    #[test]
    fn test_error_with_special_characters() {
        let error = CliError::FileNotFound("契約書/test 文件.xml".to_string());
        assert_eq!(error.to_string(), "File not found: 契約書/test 文件.xml");
    }
}
