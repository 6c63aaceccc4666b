//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use dgml_core::defaults;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Start from XML rendering with this many levels of parent context
    #[arg(long, value_name = "N")]
    pub xml_levels: Option<usize>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to tune segmentation");
        println!("2. Validate your configuration:");
        println!("   dgml validate --config {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   dgml process -i document.xml --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        let (xml_mode, levels) = match self.xml_levels {
            Some(levels) => (true, levels),
            None => (
                defaults::XML_RENDERING_MODE,
                defaults::PARENT_HIERARCHY_LEVELS,
            ),
        };
        let skip_tags = defaults::SKIP_TAGS
            .iter()
            .map(|tag| format!("\"{tag}\""))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"# DGML chunking configuration

[segmentation]
# Chunks with less text than this are merged into the following chunk
min_chunk_text_length = {min}

# Upper bound on simplified XML text and on ancestor context size
max_text_length = {max}

# Collapse runs of whitespace in rendered text
whitespace_normalize = {normalize}

# Descend into tables and chunk their contents instead of rendering
# each table as a single text grid
sub_chunk_tables = {sub_chunk_tables}

# Render chunk text as simplified XML (no namespaces or attributes)
xml_rendering_mode = {xml_mode}

# Ancestor levels rendered into each chunk's parent context.
# Values above 0 require xml_rendering_mode = true
parent_hierarchy_levels = {levels}

# Wrapper tags removed from simplified XML and skipped when counting levels
skip_tags = [{skip_tags}]

# Qualified names use Clark notation: "{{namespace-uri}}local" or "local"
structure_attribute_key = "{structure_key}"
table_tag_name = "{table_tag}"

# Structure label of list markers, always merged into the next chunk
list_marker_label = "{marker}"

# Table layout: "grid", "simple" or "plain"
table_style = "grid"

[output]
# Default output format: "text", "json" or "markdown"
format = "text"

# Pretty print JSON output
pretty_json = true

# Include the source XML of each chunk in JSON output
include_xml = false
"#,
            min = defaults::MIN_TEXT_LENGTH,
            max = defaults::MAX_TEXT_LENGTH,
            normalize = defaults::WHITESPACE_NORMALIZE,
            sub_chunk_tables = defaults::SUB_CHUNK_TABLES,
            structure_key = defaults::structure_key(),
            table_tag = defaults::table_tag(),
            marker = defaults::LIST_MARKER_LABEL,
        )
    }
}
