//! Configuration management for the program parser CLI.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project (`.gcode-parse.toml`) and user config files
//! - Merging: command line > project file > user file > defaults

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::{MalformedNumberPolicy, ParseOptions};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".gcode-parse.toml";

/// Command-line arguments for the program parser
#[derive(Debug, Parser)]
#[command(name = "gcode-parse")]
#[command(about = "Parse line-oriented machine-control programs into typed records")]
#[command(version)]
pub struct Args {
    /// Program file to parse; reads standard input when omitted
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, help = "Output format (summary, json, debug)")]
    pub format: Option<OutputFormat>,

    /// Policy for lines whose N or G/M number is not an integer
    #[arg(long, value_enum, help = "What to do with malformed N/G/M numbers")]
    pub malformed_numbers: Option<MalformedNumberPolicy>,

    /// Explicit config file; disables the project and user config lookup
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// How the parsed program is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Per-kind line counts
    #[default]
    Summary,
    /// The full program as JSON
    Json,
    /// One line per record
    Debug,
}

/// Settings read from a TOML config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub malformed_numbers: Option<MalformedNumberPolicy>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Load a config file, returning `None` when it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))?;

        log::debug!("Loaded config file {}", path.display());
        Ok(Some(config))
    }

    /// Fill unset keys from a lower-priority layer
    fn or(self, lower: FileConfig) -> FileConfig {
        FileConfig {
            malformed_numbers: self.malformed_numbers.or(lower.malformed_numbers),
            format: self.format.or(lower.format),
            log_level: self.log_level.or(lower.log_level),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Input file, or `None` for standard input
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub parse_options: ParseOptions,
    pub log_level: String,
    /// Config files that contributed, highest priority first
    pub config_files: Vec<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments and config files
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let candidates = match &args.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                vec![path.clone()]
            }
            None => Self::default_config_paths()?,
        };

        let mut layers = Vec::new();
        for path in candidates {
            if let Some(layer) = FileConfig::load(&path)? {
                layers.push((path, layer));
            }
        }

        Ok(Self::resolve(args, layers))
    }

    /// Project file first, then the user's global file
    fn default_config_paths() -> Result<Vec<PathBuf>> {
        let mut paths = vec![std::env::current_dir()?.join(PROJECT_CONFIG_FILE)];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("gcode-parse").join("config.toml"));
        }

        Ok(paths)
    }

    /// Merge arguments over file layers given highest priority first
    pub fn resolve(args: Args, layers: Vec<(PathBuf, FileConfig)>) -> Self {
        let mut config_files = Vec::new();
        let mut merged = FileConfig::default();
        for (path, layer) in layers {
            merged = merged.or(layer);
            config_files.push(path);
        }

        let policy = args
            .malformed_numbers
            .or(merged.malformed_numbers)
            .unwrap_or_default();

        Config {
            input: args.input,
            format: args.format.or(merged.format).unwrap_or_default(),
            parse_options: ParseOptions::new().malformed_numbers(policy),
            log_level: args
                .log_level
                .or(merged.log_level)
                .unwrap_or_else(|| "warn".to_string()),
            config_files,
        }
    }

    pub fn has_config_file(&self) -> bool {
        !self.config_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gcode-parse").chain(argv.iter().copied()))
            .expect("parse args")
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(args(&[]), Vec::new());
        assert_eq!(config.input, None);
        assert_eq!(config.format, OutputFormat::Summary);
        assert_eq!(
            config.parse_options.malformed_numbers,
            MalformedNumberPolicy::Abort
        );
        assert_eq!(config.log_level, "warn");
        assert!(!config.has_config_file());
    }

    #[test]
    fn test_cli_overrides_files() {
        let project = FileConfig {
            malformed_numbers: Some(MalformedNumberPolicy::Demote),
            format: Some(OutputFormat::Json),
            log_level: None,
        };
        let user = FileConfig {
            malformed_numbers: Some(MalformedNumberPolicy::Abort),
            format: Some(OutputFormat::Debug),
            log_level: Some("info".to_string()),
        };

        let config = Config::resolve(
            args(&["--format", "debug", "prog.nc"]),
            vec![
                (PathBuf::from("project.toml"), project),
                (PathBuf::from("user.toml"), user),
            ],
        );

        assert_eq!(config.input, Some(PathBuf::from("prog.nc")));
        assert_eq!(config.format, OutputFormat::Debug);
        // project beats user
        assert_eq!(
            config.parse_options.malformed_numbers,
            MalformedNumberPolicy::Demote
        );
        // only the user file sets it
        assert_eq!(config.log_level, "info");
        assert_eq!(config.config_files.len(), 2);
    }

    #[test]
    fn test_parse_file_config() {
        let config: FileConfig =
            toml::from_str("malformed_numbers = \"demote\"\nformat = \"json\"\n").unwrap();
        assert_eq!(config.malformed_numbers, Some(MalformedNumberPolicy::Demote));
        assert_eq!(config.format, Some(OutputFormat::Json));

        assert!(toml::from_str::<FileConfig>("colour = \"red\"\n").is_err());
    }
}
