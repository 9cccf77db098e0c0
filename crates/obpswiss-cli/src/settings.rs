//! File-backed settings
//!
//! A flat JSON object in `<config dir>/obpswiss-cli/config.json`. The file is
//! read on every `get`, so a token set by another invocation is picked up
//! immediately.

use anyhow::Context;
use obpswiss_sdk::{SettingKey, SettingsProvider};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the settings directory
pub const CONFIG_DIR_ENV: &str = "OBPSWISS_CONFIG_DIR";

const PROJECT_NAME: &str = "obpswiss-cli";
const FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    /// Settings stored at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `config.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(FILE_NAME))
    }

    /// `OBPSWISS_CONFIG_DIR` when set, else the platform config directory
    pub fn from_env() -> anyhow::Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::in_dir(PathBuf::from(dir)));
        }
        let base = dirs::config_dir().context("could not determine the configuration directory")?;
        Ok(Self::in_dir(base.join(PROJECT_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn store(&self, values: &Map<String, Value>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, raw)
    }
}

impl SettingsProvider for FileSettings {
    fn get(&self, key: SettingKey) -> String {
        match self.load() {
            Ok(values) => values
                .get(key.as_str())
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                warn!(path = %self.path.display(), "unreadable settings file: {}", e);
                String::new()
            }
        }
    }

    fn set(&self, key: SettingKey, value: &str) -> io::Result<()> {
        let mut values = self.load()?;
        values.insert(key.as_str().to_string(), Value::String(value.to_string()));
        self.store(&values)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
