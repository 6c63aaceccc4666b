//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{
    JsonFormatter, MarkdownFormatter, OutputFormat, OutputFormatter, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use dgml_core::GridStyle;
use dgml_engine::{ChunkProcessor, Input};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args, Default)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text, or the config file's choice]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "DGML_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum chunk text length before merging forward
    #[arg(long, value_name = "CHARS")]
    pub min_length: Option<usize>,

    /// Maximum rendered XML length
    #[arg(long, value_name = "CHARS")]
    pub max_length: Option<usize>,

    /// Render chunks as simplified XML
    #[arg(long)]
    pub xml: bool,

    /// Ancestor levels of parent context (requires --xml)
    #[arg(long, value_name = "N")]
    pub levels: Option<usize>,

    /// Descend into tables instead of rendering them whole
    #[arg(long)]
    pub sub_chunk_tables: bool,

    /// Keep whitespace exactly as written
    #[arg(long)]
    pub no_normalize: bool,

    /// Wrapper tags elided from XML output (comma separated)
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub skip_tags: Option<Vec<String>>,

    /// Table grid style (grid, simple, plain)
    #[arg(long, value_name = "STYLE")]
    pub table_style: Option<GridStyle>,

    /// Include source XML in JSON output
    #[arg(long)]
    pub include_xml: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting DGML chunking");
        log::debug!("Arguments: {:?}", self);

        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        self.apply_overrides(&mut config);

        let segmenter_config = config.segmentation.to_segmenter_config()?;
        let processor = ChunkProcessor::with_config(segmenter_config)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to process", files.len());

        let format = self.format.unwrap_or(config.output.format);
        let mut formatter = self.create_formatter(format, &config)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let mut total_chunks = 0;
        for path in &files {
            log::debug!(
                "Processing {} ({} bytes)",
                path.display(),
                FileReader::file_size(path)?
            );
            let text = FileReader::read_text(path)?;
            let output = processor
                .process(Input::from_text(text))
                .map_err(|source| CliError::ChunkingFailed {
                    path: path.display().to_string(),
                    source,
                })?;

            let source = path.display().to_string();
            for mut chunk in output.chunks {
                chunk
                    .metadata
                    .insert("source".to_string(), source.clone().into());
                formatter.format_chunk(&chunk)?;
            }

            log::info!(
                "{}: {} chunks from {} elements in {:.2} ms",
                source,
                output.metadata.chunk_count,
                output.metadata.element_count,
                output.metadata.processing_time_ms
            );
            total_chunks += output.metadata.chunk_count;
            progress.file_completed(&source, output.metadata.chunk_count);
        }

        formatter.finish()?;
        progress.finish();
        log::info!("Wrote {total_chunks} chunks");

        Ok(())
    }

    /// Layer command-line flags over the loaded configuration
    pub fn apply_overrides(&self, config: &mut CliConfig) {
        let segmentation = &mut config.segmentation;
        if let Some(min) = self.min_length {
            segmentation.min_chunk_text_length = min;
        }
        if let Some(max) = self.max_length {
            segmentation.max_text_length = max;
        }
        if self.xml {
            segmentation.xml_rendering_mode = true;
        }
        if let Some(levels) = self.levels {
            segmentation.parent_hierarchy_levels = levels;
        }
        if self.sub_chunk_tables {
            segmentation.sub_chunk_tables = true;
        }
        if self.no_normalize {
            segmentation.whitespace_normalize = false;
        }
        if let Some(tags) = &self.skip_tags {
            segmentation.skip_tags = tags.clone();
        }
        if let Some(style) = self.table_style {
            segmentation.table_style = style;
        }

        let output = &mut config.output;
        if self.include_xml {
            output.include_xml = true;
        }
        if self.compact {
            output.pretty_json = false;
        }
    }

    fn create_formatter(
        &self,
        format: OutputFormat,
        config: &CliConfig,
    ) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(
                writer,
                config.output.pretty_json,
                config.output.include_xml,
            )),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
