//! Project configuration file (docshell.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct PagesConfig {
    /// Directory holding page files
    #[serde(default = "default_pages_dir")]
    pub dir: PathBuf,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: default_pages_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    /// Output directory for built documents
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Minify inline stylesheets
    #[serde(default = "default_true")]
    pub minify: bool,
    /// Prepend `<!DOCTYPE html>`
    #[serde(default = "default_true")]
    pub doctype: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            minify: true,
            doctype: true,
        }
    }
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("pages")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_true() -> bool {
    true
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
