//! Structural segmentation of a document into chunks
//!
//! The walk is a depth-first pre-order traversal. Each element is either a
//! leaf, which becomes one chunk, or an internal node whose children are
//! visited in order. A single held-back chunk is carried across the walk:
//! fragments that are too short, and list markers, are merged forward into
//! whatever chunk comes next.

use crate::config::SegmenterConfig;
use crate::error::Result;
use dgml_core::tags::structure_label;
use dgml_core::{
    clean_tag, has_structural_descendant, is_descendant_of_structural, is_structural,
    nth_ancestor, render_table_with, render_text, simplified_xml, Chunk, Document, Metadata, Node,
    SimplifyOptions, TableTags,
};
use tracing::debug;

/// How a leaf element is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// A table kept whole
    Table,
    /// A structural element with no structural descendants
    Structural,
    /// Unmarked content inside a structural element
    Orphan,
}

/// Cuts documents into ordered chunks
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
    simplify: SimplifyOptions,
    table_tags: TableTags,
}

impl Segmenter {
    /// Create a segmenter, rejecting contradictory configurations
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            simplify: config.simplify_options(),
            table_tags: config.table_tags(),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment a whole document
    pub fn segment(&self, document: &Document) -> Result<Vec<Chunk>> {
        self.segment_node(document.root())
    }

    /// Segment the subtree rooted at `root`
    pub fn segment_node(&self, root: Node<'_>) -> Result<Vec<Chunk>> {
        let mut accumulator = ChunkAccumulator::new(self.config.min_chunk_text_length);
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match self.classify(node) {
                Some(kind) => {
                    let chunk = self.build_chunk(node, kind)?;
                    let is_marker = chunk.structure == self.config.list_marker_label;
                    accumulator.push(chunk, is_marker);
                }
                None => stack.extend(node.children().rev()),
            }
        }

        Ok(accumulator.finish())
    }

    /// Decide whether `node` is a leaf, and of which kind
    pub fn classify(&self, node: Node<'_>) -> Option<LeafKind> {
        if !self.config.sub_chunk_tables && node.has_name(&self.config.table_tag_name) {
            return Some(LeafKind::Table);
        }

        let key = &self.config.structure_attribute_key;
        if has_structural_descendant(node, key) {
            None
        } else if is_structural(node, key) {
            Some(LeafKind::Structural)
        } else if is_descendant_of_structural(node, key) {
            Some(LeafKind::Orphan)
        } else {
            None
        }
    }

    fn render(&self, node: Node<'_>, kind: LeafKind) -> Result<String> {
        if self.config.xml_rendering_mode {
            return Ok(simplified_xml(node, 0, &self.simplify));
        }
        let normalize = self.config.whitespace_normalize;
        match kind {
            LeafKind::Table => Ok(render_table_with(
                node,
                &self.table_tags,
                normalize,
                self.config.table_style,
            )?),
            LeafKind::Structural | LeafKind::Orphan => Ok(render_text(node, normalize)),
        }
    }

    fn build_chunk(&self, node: Node<'_>, kind: LeafKind) -> Result<Chunk> {
        let text = self.render(node, kind)?;
        let parent = (self.config.xml_rendering_mode && self.config.parent_hierarchy_levels > 0)
            .then(|| Box::new(self.context_chunk(node)));

        Ok(Chunk {
            tag: clean_tag(Some(node)).to_string(),
            text,
            xml: node.to_xml(),
            structure: structure_label(node, &self.config.structure_attribute_key).to_string(),
            xpath: node.xpath(),
            parent,
            metadata: Metadata::new(),
        })
    }

    /// The leaf rendered at the configured number of ancestor levels
    fn context_chunk(&self, node: Node<'_>) -> Chunk {
        let levels = self.config.parent_hierarchy_levels;
        let ancestor = nth_ancestor(node, levels, &self.simplify);
        Chunk {
            tag: clean_tag(Some(ancestor)).to_string(),
            text: simplified_xml(ancestor, 0, &self.simplify),
            xml: ancestor.to_xml(),
            structure: structure_label(ancestor, &self.config.structure_attribute_key).to_string(),
            xpath: ancestor.xpath(),
            parent: None,
            metadata: Metadata::new(),
        }
    }
}

/// Collects emitted chunks and the one chunk held back for merging
#[derive(Debug)]
struct ChunkAccumulator {
    emitted: Vec<Chunk>,
    pending: Option<Chunk>,
    min_text_length: usize,
}

impl ChunkAccumulator {
    fn new(min_text_length: usize) -> Self {
        Self {
            emitted: Vec::new(),
            pending: None,
            min_text_length,
        }
    }

    fn push(&mut self, chunk: Chunk, is_marker: bool) {
        let chunk = match self.pending.take() {
            Some(held) => held + chunk,
            None => chunk,
        };

        if is_marker || chunk.text_len() < self.min_text_length {
            debug!(xpath = %chunk.xpath, length = chunk.text_len(), "holding chunk for merge");
            self.pending = Some(chunk);
        } else {
            debug!(xpath = %chunk.xpath, length = chunk.text_len(), "emitting chunk");
            self.emitted.push(chunk);
        }
    }

    fn finish(mut self) -> Vec<Chunk> {
        if let Some(held) = self.pending.take() {
            debug!(xpath = %held.xpath, "flushing trailing chunk");
            self.emitted.push(held);
        }
        self.emitted
    }
}
