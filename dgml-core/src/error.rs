//! Core error types

use thiserror::Error;

/// Errors raised by the document model and the renderers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A renderer was handed an element of the wrong kind
    #[error("invalid node kind: expected <{expected}>, found <{found}>")]
    InvalidNodeKind {
        /// The element name the renderer accepts
        expected: String,
        /// The element name it was given
        found: String,
    },

    /// The source text is not well-formed XML
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The source bytes are not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_node_kind_display() {
        let error = CoreError::InvalidNodeKind {
            expected: "{http://www.w3.org/1999/xhtml}table".to_string(),
            found: "div".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid node kind: expected <{http://www.w3.org/1999/xhtml}table>, found <div>"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let error = CoreError::Parse("unexpected end of input at byte 12".to_string());
        assert!(error.to_string().starts_with("XML parse error:"));
    }
}
