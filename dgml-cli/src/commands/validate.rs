//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let result = CliConfig::load(&self.config).and_then(|config| {
            config
                .segmentation
                .to_segmenter_config()
                .map(|engine| (config, engine))
        });

        match result {
            Ok((config, engine)) => {
                println!("✓ Configuration is valid!");
                println!("  Minimum chunk length: {}", engine.min_chunk_text_length);
                println!("  XML rendering: {}", engine.xml_rendering_mode);
                println!("  Parent levels: {}", engine.parent_hierarchy_levels);
                println!("  Table style: {}", engine.table_style);
                println!("  Output format: {:?}", config.output.format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            config: PathBuf::from("dgml.toml"),
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("dgml.toml"));
    }

    #[test]
    fn test_validate_valid_config() {
        let temp_file = write_config(
            r#"
[segmentation]
xml_rendering_mode = true
parent_hierarchy_levels = 3

[output]
format = "markdown"
"#,
        );

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_conflicting_config() {
        let temp_file = write_config("[segmentation]\nparent_hierarchy_levels = 3\n");

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("requires xml_rendering_mode"));
    }

    #[test]
    fn test_validate_malformed_toml() {
        let temp_file = write_config("[segmentation\nmin_chunk_text_length = ");

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/dgml.toml"),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
