use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Startup configuration. Paths are resolved exactly once here; there is no
/// fallback probing of alternate locations, so a wrong path fails loudly at
/// load time instead of silently reading a stale artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub db_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/silica_model.json"),
            db_path: PathBuf::from("monitoring.db"),
        }
    }
}

impl AppConfig {
    /// Reads the config file if present, otherwise falls back to defaults.
    /// A present-but-invalid file is an error, not a silent default.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}
