//! Directory of widget configuration documents.
//!
//! Each widget has its own `gotransit-config-<id>.json`. A shared
//! `gotransit-config.json` is used for widgets without one, and built-in
//! defaults apply when neither exists.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::WidgetConfig;
use super::id::{InvalidWidgetId, WidgetId};
use super::lines;

const FILE_PREFIX: &str = "gotransit-config-";
const FILE_SUFFIX: &str = ".json";
const FALLBACK_FILE: &str = "gotransit-config.json";

/// Errors from the configuration store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidId(#[from] InvalidWidgetId),

    /// Document failed validation
    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("no configuration for widget {id}")]
    NotFound { id: WidgetId },

    #[error("configuration for widget {id} already exists")]
    AlreadyExists { id: WidgetId },

    #[error("failed to access {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to encode configuration for widget {id}: {message}")]
    Encode { id: WidgetId, message: String },
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// The widget's own document.
    Widget,
    /// The shared fallback document.
    Fallback,
    /// Built-in defaults.
    Default,
}

/// A configuration and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedConfig {
    pub config: WidgetConfig,
    pub source: ConfigSource,
}

/// A widget's own stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredWidget {
    pub id: WidgetId,
    pub config: WidgetConfig,
}

/// Reads and writes widget configurations in one directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a widget's own document.
    pub fn widget_path(&self, id: &WidgetId) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{id}{FILE_SUFFIX}"))
    }

    /// Path of the shared fallback document.
    pub fn fallback_path(&self) -> PathBuf {
        self.dir.join(FALLBACK_FILE)
    }

    /// Load the configuration for `id`, falling back as needed.
    pub fn load(&self, id: &WidgetId) -> Result<LoadedConfig, ConfigError> {
        let widget_path = self.widget_path(id);
        if widget_path.is_file() {
            return Ok(LoadedConfig {
                config: read_config(&widget_path)?,
                source: ConfigSource::Widget,
            });
        }

        let fallback_path = self.fallback_path();
        if fallback_path.is_file() {
            debug!(widget = %id, "Using shared configuration");
            return Ok(LoadedConfig {
                config: read_config(&fallback_path)?,
                source: ConfigSource::Fallback,
            });
        }

        debug!(widget = %id, "Using default configuration");
        Ok(LoadedConfig {
            config: WidgetConfig::default(),
            source: ConfigSource::Default,
        })
    }

    /// Write the default template for `id`.
    ///
    /// Fails with [`ConfigError::AlreadyExists`] unless `overwrite` is set.
    pub fn create(&self, id: &WidgetId, overwrite: bool) -> Result<WidgetConfig, ConfigError> {
        if !overwrite && self.widget_path(id).exists() {
            return Err(ConfigError::AlreadyExists { id: id.clone() });
        }

        let config = WidgetConfig::default();
        self.save(id, &config)?;
        info!(widget = %id, overwrite, "Created widget configuration");
        Ok(config)
    }

    /// Write a widget's document, creating the directory if needed.
    pub fn save(&self, id: &WidgetId, config: &WidgetConfig) -> Result<(), ConfigError> {
        for name in [&config.departure, &config.arrival] {
            if !lines::is_known_station(name) {
                warn!(widget = %id, station = %name, "Station is not on any known line");
            }
        }

        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| ConfigError::Io {
                path: self.dir.clone(),
                message: e.to_string(),
            })?;
        }

        let path = self.widget_path(id);
        let json = serde_json::to_string_pretty(config).map_err(|e| ConfigError::Encode {
            id: id.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&path, json).map_err(|e| ConfigError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        debug!(widget = %id, path = %path.display(), "Saved widget configuration");
        Ok(())
    }

    /// All widget documents, sorted by id.
    ///
    /// The shared fallback is not a widget and is not listed. Files whose
    /// names are not valid ids are skipped.
    pub fn list(&self) -> Result<Vec<StoredWidget>, ConfigError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| ConfigError::Io {
            path: self.dir.clone(),
            message: e.to_string(),
        })?;

        let mut widgets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                path: self.dir.clone(),
                message: e.to_string(),
            })?;

            let file_name = entry.file_name();
            let Some(raw_id) = file_name
                .to_str()
                .and_then(|n| n.strip_prefix(FILE_PREFIX))
                .and_then(|n| n.strip_suffix(FILE_SUFFIX))
            else {
                continue;
            };

            let id = match WidgetId::parse(raw_id) {
                Ok(id) => id,
                Err(e) => {
                    warn!(file = ?file_name, error = %e, "Skipping configuration file");
                    continue;
                }
            };

            let config = read_config(&entry.path())?;
            widgets.push(StoredWidget { id, config });
        }

        widgets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(widgets)
    }

    /// Remove a widget's document.
    pub fn delete(&self, id: &WidgetId) -> Result<(), ConfigError> {
        let path = self.widget_path(id);
        if !path.is_file() {
            return Err(ConfigError::NotFound { id: id.clone() });
        }

        std::fs::remove_file(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        info!(widget = %id, "Deleted widget configuration");
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
