//! Document processor and builder

use crate::{
    config::{SegmenterConfig, SegmenterConfigBuilder},
    error::Result,
    input::Input,
    segmenter::Segmenter,
};
use dgml_core::{Chunk, Document, GridStyle};
use std::time::Instant;
use tracing::info;

/// Chunks plus statistics for one processed document
#[derive(Debug, Clone)]
pub struct Output {
    /// Chunks in document order
    pub chunks: Vec<Chunk>,
    /// Processing statistics
    pub metadata: ProcessingMetadata,
}

/// Processing statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingMetadata {
    /// Bytes of XML text processed
    pub bytes_processed: usize,
    /// Elements in the parsed document
    pub element_count: usize,
    /// Chunks produced
    pub chunk_count: usize,
    /// Parse plus segmentation time in milliseconds
    pub processing_time_ms: f64,
}

/// Entry point for turning DGML input into chunks
#[derive(Debug, Clone)]
pub struct ChunkProcessor {
    segmenter: Segmenter,
}

impl ChunkProcessor {
    /// Create a processor with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(SegmenterConfig::default())
    }

    /// Create a processor, validating the configuration eagerly
    pub fn with_config(config: SegmenterConfig) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new(config)?,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SegmenterConfig {
        self.segmenter.config()
    }

    /// Parse and segment an input
    pub fn process(&self, input: Input) -> Result<Output> {
        let start = Instant::now();
        let text = input.into_text()?;
        let document = Document::parse(&text)?;
        let chunks = self.segmenter.segment(&document)?;

        let metadata = ProcessingMetadata {
            bytes_processed: text.len(),
            element_count: document.len(),
            chunk_count: chunks.len(),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            bytes = metadata.bytes_processed,
            elements = metadata.element_count,
            chunks = metadata.chunk_count,
            "segmented document"
        );

        Ok(Output { chunks, metadata })
    }

    /// Parse and segment XML text (convenience method)
    pub fn process_str(&self, xml: &str) -> Result<Vec<Chunk>> {
        Ok(self.process(Input::from_text(xml))?.chunks)
    }

    /// Segment an already parsed document
    pub fn process_document(&self, document: &Document) -> Result<Vec<Chunk>> {
        self.segmenter.segment(document)
    }
}

/// Builder for [`ChunkProcessor`]
#[derive(Debug, Default)]
pub struct ChunkProcessorBuilder {
    config_builder: SegmenterConfigBuilder,
}

impl ChunkProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum chunk text length
    pub fn min_chunk_text_length(mut self, length: usize) -> Self {
        self.config_builder = self.config_builder.min_chunk_text_length(length);
        self
    }

    /// Set the maximum rendered text length
    pub fn max_text_length(mut self, length: usize) -> Self {
        self.config_builder = self.config_builder.max_text_length(length);
        self
    }

    /// Enable or disable whitespace normalization
    pub fn whitespace_normalize(mut self, normalize: bool) -> Self {
        self.config_builder = self.config_builder.whitespace_normalize(normalize);
        self
    }

    /// Enable or disable table sub-chunking
    pub fn sub_chunk_tables(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.sub_chunk_tables(enabled);
        self
    }

    /// Enable or disable simplified XML rendering
    pub fn xml_rendering_mode(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.xml_rendering_mode(enabled);
        self
    }

    /// Set the number of ancestor levels for parent context
    pub fn parent_hierarchy_levels(mut self, levels: usize) -> Self {
        self.config_builder = self.config_builder.parent_hierarchy_levels(levels);
        self
    }

    /// Replace the skip tags
    pub fn skip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_builder = self.config_builder.skip_tags(tags);
        self
    }

    /// Set the table grid style
    pub fn table_style(mut self, style: GridStyle) -> Self {
        self.config_builder = self.config_builder.table_style(style);
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<ChunkProcessor> {
        ChunkProcessor::with_config(self.config_builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_process_reports_metadata() {
        let processor = ChunkProcessor::new().unwrap();
        let xml = r#"<doc><p structure="p">A paragraph of text.</p></doc>"#;
        let output = processor.process(Input::from_text(xml)).unwrap();
        assert_eq!(output.chunks.len(), 1);
        assert_eq!(output.metadata.chunk_count, 1);
        assert_eq!(output.metadata.element_count, 2);
        assert_eq!(output.metadata.bytes_processed, xml.len());
        assert!(output.metadata.processing_time_ms >= 0.0);
    }

    #[test]
    fn test_malformed_xml_propagates_parse_error() {
        let processor = ChunkProcessor::new().unwrap();
        let err = processor.process_str("<doc><p></doc>").unwrap_err();
        assert!(matches!(err, EngineError::Core(dgml_core::CoreError::Parse(_))));
    }

    #[test]
    fn test_builder_validates_eagerly() {
        let err = ChunkProcessorBuilder::new()
            .parent_hierarchy_levels(1)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::ConfigurationConflict(_)));
    }

    #[test]
    fn test_builder_applies_options() {
        let processor = ChunkProcessorBuilder::new()
            .min_chunk_text_length(0)
            .xml_rendering_mode(true)
            .table_style(GridStyle::Plain)
            .build()
            .unwrap();
        assert_eq!(processor.config().min_chunk_text_length, 0);
        assert!(processor.config().xml_rendering_mode);
        assert_eq!(processor.config().table_style, GridStyle::Plain);
    }
}
