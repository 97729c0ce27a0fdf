//! Configuration file support for the command-line tool

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rowclean_core::CleanOptions;
use serde::Deserialize;

/// Complete CLI configuration
///
/// ```toml
/// [clean]
/// mode = "dedup-only"
///
/// [output]
/// prefix = "cleaned_"
/// dir = "out"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub clean: CleanOptions,
    pub output: OutputConfig,
}

/// Where cleaned files are written when no explicit path is given
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Prepended to the input file name
    pub prefix: String,
    /// Output directory, the input file's directory when unset
    pub dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "cleaned_".to_string(),
            dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
