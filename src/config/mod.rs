use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Digit sprite sheet path (defaults to the bundled sheet).
    pub sheet_path: Option<PathBuf>,
    /// Default output path for the rendered icon.
    pub output_path: Option<PathBuf>,
    /// Battery poll interval in seconds.
    #[serde(default = "default_interval")]
    pub poll_interval_secs: u64,
}

fn default_interval() -> u64 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_path: None,
            output_path: None,
            poll_interval_secs: 1,
        }
    }
}

impl AppConfig {
    /// Config file path: ~/.config/battray/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("battray");
        config_dir.join("config.toml")
    }

    /// Load config from disk, or return defaults.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }
        Self::default()
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        tracing::info!("Config saved to {}", path.display());
        Ok(())
    }
}
