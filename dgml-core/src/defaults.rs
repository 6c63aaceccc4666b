//! Default configuration constants

use crate::dom::ExpandedName;

/// Namespace of XHTML table markup embedded in DGML
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Attribute marking an element as a structural unit
pub const STRUCTURE_KEY: &str = "structure";

/// Local name of the table element
pub const TABLE_TAG: &str = "table";

/// Local name of table rows
pub const TABLE_ROW_TAG: &str = "tr";

/// Local name of table cells
pub const TABLE_CELL_TAG: &str = "td";

/// Structure label of list numbering glyphs ("1.", "a)")
pub const LIST_MARKER_LABEL: &str = "lim";

/// Chunks with fewer characters are merged into the following chunk
pub const MIN_TEXT_LENGTH: usize = 8;

/// Upper bound on rendered chunk and ancestor text (characters)
pub const MAX_TEXT_LENGTH: usize = 1024 * 4;

/// Collapse whitespace runs in rendered text
pub const WHITESPACE_NORMALIZE: bool = true;

/// Decompose tables into their structural parts instead of rendering them whole
pub const SUB_CHUNK_TABLES: bool = false;

/// Render chunk text as simplified XML
pub const XML_RENDERING_MODE: bool = false;

/// Ancestor levels rendered as parent context
pub const PARENT_HIERARCHY_LEVELS: usize = 0;

/// Wrapper elements elided from hierarchy context
pub const SKIP_TAGS: &[&str] = &["chunk"];

/// The default structure attribute as an expanded name
pub fn structure_key() -> ExpandedName {
    ExpandedName::local(STRUCTURE_KEY)
}

/// The default table element as an expanded name
pub fn table_tag() -> ExpandedName {
    ExpandedName::new(Some(XHTML_NAMESPACE), TABLE_TAG)
}

/// The default skip tags as owned strings
pub fn skip_tags() -> Vec<String> {
    SKIP_TAGS.iter().map(|tag| tag.to_string()).collect()
}
