//! The chunk record produced by segmentation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Add;

/// Open key-value bag attached to a chunk
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One unit of segmented output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Local name of the source element, or space-joined names after a merge
    pub tag: String,
    /// Rendered content: plain text, a text grid, or simplified XML
    pub text: String,
    /// Serialized XML of the source element
    pub xml: String,
    /// Structure label of the source element, empty when unmarked
    pub structure: String,
    /// Absolute path of the source element
    pub xpath: String,
    /// The same element rendered with ancestor context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Chunk>>,
    /// Caller-defined annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl Chunk {
    /// Length of the rendered text in characters
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Combine a held-back chunk with the chunk that follows it
///
/// Text-like fields are joined with a single space. The right-hand chunk
/// supplies the xpath and, when it has one, the parent; metadata keys from
/// the right-hand side win.
impl Add for Chunk {
    type Output = Chunk;

    fn add(self, other: Chunk) -> Chunk {
        let mut metadata = self.metadata;
        metadata.extend(other.metadata);
        Chunk {
            tag: format!("{} {}", self.tag, other.tag),
            text: format!("{} {}", self.text, other.text),
            xml: format!("{} {}", self.xml, other.xml),
            structure: format!("{} {}", self.structure, other.structure),
            xpath: other.xpath,
            parent: other.parent.or(self.parent),
            metadata,
        }
    }
}
