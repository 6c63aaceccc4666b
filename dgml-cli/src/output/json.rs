//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use dgml_core::{Chunk, Metadata};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs chunks as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    chunks: Vec<Chunk>,
    pretty: bool,
    include_xml: bool,
}

/// Serialized view of a chunk
#[derive(Debug, Serialize)]
pub struct ChunkRecord<'a> {
    /// Element local name
    pub tag: &'a str,
    /// Rendered chunk text
    pub text: &'a str,
    /// Source XML, only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<&'a str>,
    /// Structure label
    pub structure: &'a str,
    /// Absolute element path
    pub xpath: &'a str,
    /// Ancestor context chunk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<ChunkRecord<'a>>>,
    /// Caller annotations
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: &'a Metadata,
}

impl<'a> ChunkRecord<'a> {
    /// Build a record, keeping the XML field only when `include_xml` is set
    pub fn new(chunk: &'a Chunk, include_xml: bool) -> Self {
        Self {
            tag: &chunk.tag,
            text: &chunk.text,
            xml: include_xml.then_some(chunk.xml.as_str()),
            structure: &chunk.structure,
            xpath: &chunk.xpath,
            parent: chunk
                .parent
                .as_deref()
                .map(|parent| Box::new(ChunkRecord::new(parent, include_xml))),
            metadata: &chunk.metadata,
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool, include_xml: bool) -> Self {
        Self {
            writer,
            chunks: Vec::new(),
            pretty,
            include_xml,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        self.chunks.push(chunk.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let records: Vec<ChunkRecord<'_>> = self
            .chunks
            .iter()
            .map(|chunk| ChunkRecord::new(chunk, self.include_xml))
            .collect();
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
