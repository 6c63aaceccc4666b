//! Segmentation engine for DGML documents
//!
//! Walks a parsed DGML tree, picks out the leaf structural elements, renders
//! each one as plain text, a text grid or simplified XML, and merges
//! undersized fragments and list markers forward into the chunk that follows.
//!
//! # Example
//!
//! ```rust
//! use dgml_engine::chunk_str;
//!
//! let xml = r#"<doc>
//!     <h structure="h1">Quarterly report</h>
//!     <p structure="p">Revenue grew in every region.</p>
//! </doc>"#;
//! let chunks = chunk_str(xml).unwrap();
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].text, "Quarterly report");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod input;
pub mod processor;
pub mod segmenter;

// Re-export key types
pub use config::{SegmenterConfig, SegmenterConfigBuilder};
pub use error::{EngineError, Result};
pub use input::Input;
pub use processor::{ChunkProcessor, ChunkProcessorBuilder, Output, ProcessingMetadata};
pub use segmenter::{LeafKind, Segmenter};

// Re-export from core for convenience
pub use dgml_core::{Chunk, Document, ExpandedName, GridStyle, Metadata};

/// Chunk XML text with the default configuration
pub fn chunk_str(xml: &str) -> Result<Vec<Chunk>> {
    ChunkProcessor::new()?.process_str(xml)
}

/// Chunk a file with the default configuration
pub fn chunk_file<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<Chunk>> {
    let processor = ChunkProcessor::new()?;
    Ok(processor
        .process(Input::from_file(path.as_ref().to_path_buf()))?
        .chunks)
}
