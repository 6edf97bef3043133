//! Scorebook configuration stored in `scorebook.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scorebook.toml";

/// Scorebook configuration (TOML).
///
/// The storage location is the only setting. Missing fields default to
/// `scores.db` next to the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScorebookConfig {
    /// SQLite database file. Relative paths resolve against the config file's directory.
    pub database_path: PathBuf,
}

impl Default for ScorebookConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("scores.db"),
        }
    }
}

impl ScorebookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(anyhow!("database_path must not be empty"));
        }
        Ok(())
    }

    /// Database path with relative paths anchored at `config_path`'s directory.
    pub fn resolve_database_path(&self, config_path: &Path) -> PathBuf {
        if self.database_path.is_absolute() {
            return self.database_path.clone();
        }
        match config_path.parent() {
            Some(parent) => parent.join(&self.database_path),
            None => self.database_path.clone(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ScorebookConfig::default()`.
pub fn load_config(path: &Path) -> Result<ScorebookConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = ScorebookConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ScorebookConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(database_path = %cfg.database_path.display(), "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ScorebookConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
