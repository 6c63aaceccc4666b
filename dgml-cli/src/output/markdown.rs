//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use dgml_core::Chunk;
use std::io::Write;

/// Markdown formatter - outputs chunks as a numbered markdown list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        self.chunk_count += 1;
        let label = if chunk.structure.is_empty() {
            &chunk.tag
        } else {
            &chunk.structure
        };
        writeln!(
            self.writer,
            "{}. **{}** `{}`",
            self.chunk_count, label, chunk.xpath
        )?;
        // Indent continuation lines so tables stay inside the list item
        for line in chunk.text.lines() {
            writeln!(self.writer, "   {line}")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total chunks: {}*", self.chunk_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
