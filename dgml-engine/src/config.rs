//! Segmentation configuration

use crate::error::{EngineError, Result};
use dgml_core::{defaults, ExpandedName, GridStyle, SimplifyOptions, TableTags};

/// Options controlling how a document is cut into chunks
#[derive(Debug, Clone, PartialEq)]
pub struct SegmenterConfig {
    /// Chunks with shorter text are held back and merged into the next one
    pub min_chunk_text_length: usize,
    /// Upper bound on rendered XML text and on ancestor context size
    pub max_text_length: usize,
    /// Collapse whitespace runs in rendered text
    pub whitespace_normalize: bool,
    /// Treat tables as ordinary containers instead of atomic leaves
    pub sub_chunk_tables: bool,
    /// Render chunk text as simplified XML
    pub xml_rendering_mode: bool,
    /// Ancestor levels rendered into each chunk's parent; needs XML mode
    pub parent_hierarchy_levels: usize,
    /// Wrapper elements elided from XML output and hierarchy counting
    pub skip_tags: Vec<String>,
    /// Attribute marking structural elements
    pub structure_attribute_key: ExpandedName,
    /// The table element
    pub table_tag_name: ExpandedName,
    /// Structure label of list markers, always merged forward
    pub list_marker_label: String,
    /// Grid style for rendered tables
    pub table_style: GridStyle,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_chunk_text_length: defaults::MIN_TEXT_LENGTH,
            max_text_length: defaults::MAX_TEXT_LENGTH,
            whitespace_normalize: defaults::WHITESPACE_NORMALIZE,
            sub_chunk_tables: defaults::SUB_CHUNK_TABLES,
            xml_rendering_mode: defaults::XML_RENDERING_MODE,
            parent_hierarchy_levels: defaults::PARENT_HIERARCHY_LEVELS,
            skip_tags: defaults::skip_tags(),
            structure_attribute_key: defaults::structure_key(),
            table_tag_name: defaults::table_tag(),
            list_marker_label: defaults::LIST_MARKER_LABEL.to_string(),
            table_style: GridStyle::default(),
        }
    }
}

impl SegmenterConfig {
    /// Create a configuration builder
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::default()
    }

    /// Every structural leaf and table cell as its own chunk
    pub fn fine_grained() -> Self {
        Self {
            min_chunk_text_length: 0,
            sub_chunk_tables: true,
            ..Default::default()
        }
    }

    /// Simplified XML chunks with `levels` of ancestor context
    pub fn xml_context(levels: usize) -> Self {
        Self {
            xml_rendering_mode: true,
            parent_hierarchy_levels: levels,
            ..Default::default()
        }
    }

    /// Check option combinations before any document is touched
    pub fn validate(&self) -> Result<()> {
        if self.parent_hierarchy_levels > 0 && !self.xml_rendering_mode {
            return Err(EngineError::ConfigurationConflict(format!(
                "parent_hierarchy_levels = {} requires xml_rendering_mode",
                self.parent_hierarchy_levels
            )));
        }
        if self.max_text_length == 0 {
            return Err(EngineError::InvalidConfig(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if self.list_marker_label.is_empty() {
            return Err(EngineError::InvalidConfig(
                "list_marker_label cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Options for the XML simplifier
    pub fn simplify_options(&self) -> SimplifyOptions {
        SimplifyOptions {
            normalize: self.whitespace_normalize,
            skip_tags: self.skip_tags.clone(),
            max_text_length: self.max_text_length,
        }
    }

    /// Table, row and cell names derived from the table element
    pub fn table_tags(&self) -> TableTags {
        TableTags::for_table(self.table_tag_name.clone())
    }
}

/// Builder for [`SegmenterConfig`]
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    config: SegmenterConfig,
}

impl SegmenterConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum chunk text length
    pub fn min_chunk_text_length(mut self, length: usize) -> Self {
        self.config.min_chunk_text_length = length;
        self
    }

    /// Set the maximum rendered text length
    pub fn max_text_length(mut self, length: usize) -> Self {
        self.config.max_text_length = length;
        self
    }

    /// Enable or disable whitespace normalization
    pub fn whitespace_normalize(mut self, normalize: bool) -> Self {
        self.config.whitespace_normalize = normalize;
        self
    }

    /// Enable or disable table sub-chunking
    pub fn sub_chunk_tables(mut self, enabled: bool) -> Self {
        self.config.sub_chunk_tables = enabled;
        self
    }

    /// Enable or disable simplified XML rendering
    pub fn xml_rendering_mode(mut self, enabled: bool) -> Self {
        self.config.xml_rendering_mode = enabled;
        self
    }

    /// Set the number of ancestor levels for parent context
    pub fn parent_hierarchy_levels(mut self, levels: usize) -> Self {
        self.config.parent_hierarchy_levels = levels;
        self
    }

    /// Replace the skip tags
    pub fn skip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.skip_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the structure attribute
    pub fn structure_attribute_key(mut self, key: ExpandedName) -> Self {
        self.config.structure_attribute_key = key;
        self
    }

    /// Set the table element
    pub fn table_tag_name(mut self, name: ExpandedName) -> Self {
        self.config.table_tag_name = name;
        self
    }

    /// Set the list marker structure label
    pub fn list_marker_label<S: Into<String>>(mut self, label: S) -> Self {
        self.config.list_marker_label = label.into();
        self
    }

    /// Set the table grid style
    pub fn table_style(mut self, style: GridStyle) -> Self {
        self.config.table_style = style;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<SegmenterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SegmenterConfig::default();
        assert_eq!(config.min_chunk_text_length, 8);
        assert!(config.whitespace_normalize);
        assert!(!config.sub_chunk_tables);
        assert!(!config.xml_rendering_mode);
        assert_eq!(config.parent_hierarchy_levels, 0);
        assert_eq!(config.list_marker_label, "lim");
        assert_eq!(
            config.table_tag_name.to_string(),
            "{http://www.w3.org/1999/xhtml}table"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hierarchy_without_xml_mode_conflicts() {
        let err = SegmenterConfig::builder()
            .parent_hierarchy_levels(2)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::ConfigurationConflict(_)));

        assert!(SegmenterConfig::builder()
            .parent_hierarchy_levels(2)
            .xml_rendering_mode(true)
            .build()
            .is_ok());
    }

    #[test]
    fn test_zero_max_length_is_invalid() {
        let err = SegmenterConfig::builder()
            .max_text_length(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_presets() {
        let fine = SegmenterConfig::fine_grained();
        assert_eq!(fine.min_chunk_text_length, 0);
        assert!(fine.sub_chunk_tables);

        let xml = SegmenterConfig::xml_context(3);
        assert!(xml.xml_rendering_mode);
        assert_eq!(xml.parent_hierarchy_levels, 3);
        assert!(xml.validate().is_ok());
    }

    #[test]
    fn test_derived_options() {
        let config = SegmenterConfig::builder()
            .whitespace_normalize(false)
            .skip_tags(["chunk", "wrapper"])
            .max_text_length(64)
            .build()
            .unwrap();
        let options = config.simplify_options();
        assert!(!options.normalize);
        assert_eq!(options.skip_tags, vec!["chunk", "wrapper"]);
        assert_eq!(options.max_text_length, 64);

        let tags = config.table_tags();
        assert_eq!(tags.row.local, "tr");
        assert_eq!(tags.cell.namespace, config.table_tag_name.namespace);
    }
}
