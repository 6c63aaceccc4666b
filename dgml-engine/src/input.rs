//! Input sources for segmentation

use crate::error::{EngineError, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Where the DGML text comes from
pub enum Input {
    /// XML text held in memory
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Bytes to decode as UTF-8
    Bytes(Vec<u8>),
    /// Reader stream (stdin, network, ...)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(&format!("<{} bytes>", text.len())).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from XML text
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the whole input as a string
    pub fn into_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path)
                .map_err(|e| EngineError::Io(format!("Failed to read file {path:?}: {e}"))),
            Input::Bytes(bytes) => String::from_utf8(bytes)
                .map_err(|e| EngineError::Encoding(format!("Invalid UTF-8: {e}"))),
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader
                    .read_to_end(&mut buffer)
                    .map_err(|e| EngineError::Io(format!("Failed to read from stream: {e}")))?;
                String::from_utf8(buffer)
                    .map_err(|e| EngineError::Encoding(format!("Invalid UTF-8 from stream: {e}")))
            }
        }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_text_input() {
        let input = Input::from("<doc/>");
        assert_eq!(input.into_text().unwrap(), "<doc/>");
    }

    #[test]
    fn test_bytes_input_rejects_invalid_utf8() {
        let input = Input::from_bytes(vec![0x3c, 0xff, 0xfe]);
        assert!(matches!(input.into_text(), Err(EngineError::Encoding(_))));
    }

    #[test]
    fn test_reader_input() {
        let input = Input::from_reader(Cursor::new(b"<doc>text</doc>".to_vec()));
        assert_eq!(input.into_text().unwrap(), "<doc>text</doc>");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let input = Input::from_file("/nonexistent/document.xml");
        assert!(matches!(input.into_text(), Err(EngineError::Io(_))));
    }

    #[test]
    fn test_debug_hides_content() {
        let debug = format!("{:?}", Input::from_bytes(vec![1, 2, 3]));
        assert_eq!(debug, "Bytes(\"<3 bytes>\")");
    }
}
