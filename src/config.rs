use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};

/// Deficiency identifier settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeficiencyConfig {
    /// Localized prefix rendered in front of the sequence number
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for DeficiencyConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "brist".to_string()
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

fn default_format() -> String {
    "terminal".to_string()
}

/// Top-level auditmap configuration, read from `.auditmap.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditmapConfig {
    #[serde(default)]
    pub deficiency: DeficiencyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AuditmapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.deficiency.prefix.trim().is_empty() {
            return Err(Error::Configuration(
                "deficiency prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub const CONFIG_FILE_NAME: &str = ".auditmap.toml";

/// Loads configuration from the given path, or from `.auditmap.toml` in the
/// working directory. A missing file yields the defaults; a malformed file
/// is reported, not papered over.
pub fn load_config(path: Option<&Path>) -> Result<AuditmapConfig> {
    let path: PathBuf = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    if !path.exists() {
        return Ok(AuditmapConfig::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|e| Error::FileSystem {
        message: format!("failed to read configuration: {e}"),
        path: Some(path.clone()),
        source: Some(e),
    })?;
    let config: AuditmapConfig =
        toml::from_str(&raw).map_err(|e| Error::Configuration(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
