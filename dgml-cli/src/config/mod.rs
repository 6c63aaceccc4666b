//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use dgml_core::{defaults, ExpandedName, GridStyle};
use dgml_engine::{SegmenterConfig, SegmenterConfigBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Segmentation configuration
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Segmentation-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Chunks shorter than this are merged into the next one
    pub min_chunk_text_length: usize,

    /// Maximum rendered XML length
    pub max_text_length: usize,

    /// Collapse whitespace in rendered text
    pub whitespace_normalize: bool,

    /// Descend into tables instead of rendering them whole
    pub sub_chunk_tables: bool,

    /// Render chunks as simplified XML
    pub xml_rendering_mode: bool,

    /// Ancestor levels of parent context (XML mode only)
    pub parent_hierarchy_levels: usize,

    /// Wrapper tags elided from XML output
    pub skip_tags: Vec<String>,

    /// Structure attribute, in Clark notation
    pub structure_attribute_key: String,

    /// Table element, in Clark notation
    pub table_tag_name: String,

    /// Structure label of list markers
    pub list_marker_label: String,

    /// Table grid style
    pub table_style: GridStyle,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_chunk_text_length: defaults::MIN_TEXT_LENGTH,
            max_text_length: defaults::MAX_TEXT_LENGTH,
            whitespace_normalize: defaults::WHITESPACE_NORMALIZE,
            sub_chunk_tables: defaults::SUB_CHUNK_TABLES,
            xml_rendering_mode: defaults::XML_RENDERING_MODE,
            parent_hierarchy_levels: defaults::PARENT_HIERARCHY_LEVELS,
            skip_tags: defaults::skip_tags(),
            structure_attribute_key: defaults::structure_key().to_string(),
            table_tag_name: defaults::table_tag().to_string(),
            list_marker_label: defaults::LIST_MARKER_LABEL.to_string(),
            table_style: GridStyle::default(),
        }
    }
}

impl SegmentationConfig {
    /// Engine builder seeded with these settings
    ///
    /// Fails when a qualified name is not valid Clark notation.
    pub fn to_builder(&self) -> Result<SegmenterConfigBuilder> {
        let structure_key = parse_name("structure_attribute_key", &self.structure_attribute_key)?;
        let table_tag = parse_name("table_tag_name", &self.table_tag_name)?;

        Ok(SegmenterConfig::builder()
            .min_chunk_text_length(self.min_chunk_text_length)
            .max_text_length(self.max_text_length)
            .whitespace_normalize(self.whitespace_normalize)
            .sub_chunk_tables(self.sub_chunk_tables)
            .xml_rendering_mode(self.xml_rendering_mode)
            .parent_hierarchy_levels(self.parent_hierarchy_levels)
            .skip_tags(self.skip_tags.iter().cloned())
            .structure_attribute_key(structure_key)
            .table_tag_name(table_tag)
            .list_marker_label(self.list_marker_label.clone())
            .table_style(self.table_style))
    }

    /// Build and validate the engine configuration
    pub fn to_segmenter_config(&self) -> Result<SegmenterConfig> {
        self.to_builder()?
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

fn parse_name(field: &str, value: &str) -> Result<ExpandedName> {
    value
        .parse()
        .map_err(|e| CliError::ConfigError(format!("{field}: {e}")).into())
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Include source XML in JSON output
    pub include_xml: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
            include_xml: false,
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
