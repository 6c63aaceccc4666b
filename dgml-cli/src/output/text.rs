//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use dgml_core::Chunk;
use std::io::Write;

/// Plain text formatter - outputs chunk text separated by blank lines
pub struct TextFormatter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "{}", chunk.text)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
