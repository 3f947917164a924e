//! Grid configuration persistence
//!
//! Stores user preferences in `~/.config/itemgrid/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// JSON file holding the items
    #[serde(default = "default_store")]
    pub store: PathBuf,
    /// Max characters shown per cell before truncation
    #[serde(default = "default_column_width")]
    pub column_width: usize,
    /// Rows shown at once
    #[serde(default = "default_visible_rows")]
    pub visible_rows: usize,
    /// Also write debug logs to the rolling log file
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,
}

fn default_store() -> PathBuf {
    crate::config_paths::default_store_file().unwrap_or_else(|| PathBuf::from("items.json"))
}

fn default_column_width() -> usize {
    18
}

fn default_visible_rows() -> usize {
    20
}

fn default_file_logging() -> bool {
    true
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            column_width: default_column_width(),
            visible_rows: default_visible_rows(),
            file_logging: default_file_logging(),
        }
    }
}

impl GridConfig {
    /// Load config from the standard location, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the standard location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
