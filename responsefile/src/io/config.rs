//! Configuration stored in `responsefile.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::expand::ExpandOptions;
use crate::io::shorten::ShortenOptions;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "responsefile.toml";

/// Shorten/expand settings (TOML).
///
/// Missing tables and fields fall back to the library defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub shorten: ShortenOptions,
    pub expand: ExpandOptions,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.expand.max_depth == Some(0) {
            return Err(anyhow!("expand.max_depth must be > 0"));
        }
        if let Some(dir) = &self.shorten.temp_dir {
            if dir.as_os_str().is_empty() {
                return Err(anyhow!("shorten.temp_dir must not be empty"));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
