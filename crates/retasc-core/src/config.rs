//! Configuration management for retasc.
//!
//! Handles loading and saving configuration from TOML files.
//! Config files are stored in platform-specific locations:
//!
//! - **macOS/Linux**: `~/.config/retasc/config.toml`
//! - **Windows**: `%APPDATA%\retasc\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use retasc_core::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("jira.url", "https://issues.example.com")?;
//! config.save()?;
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "retasc";

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Jira connection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,
}

/// Jira connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Jira instance URL
    pub url: String,
    /// Personal access token, or `user:password`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Get the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns a default (empty) config if the file doesn't exist. A file
    /// that stores a token but is readable by other users is still loaded,
    /// with a warning.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "No retasc config, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

        if config.has_token() && is_shared(path) {
            warn!(path = ?path, "Config holds a Jira token but is readable by other users");
        }

        debug!(path = ?path, jira = config.jira.is_some(), "Config loaded");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    ///
    /// When a token is stored the file is made readable by the owner only.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        let write_err =
            |e: std::io::Error| Error::Config(format!("Failed to write {}: {}", path.display(), e));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, contents).map_err(write_err)?;
        if self.has_token() {
            restrict_to_owner(path).map_err(write_err)?;
        }

        info!(path = ?path, token = self.has_token(), "Config saved");
        Ok(())
    }

    /// Whether a Jira token is stored.
    pub fn has_token(&self) -> bool {
        self.jira.as_ref().is_some_and(|j| j.token.is_some())
    }

    /// Set a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `jira.url`, `jira.token`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = split_key(key)?;

        match section {
            "jira" => {
                let config = self.jira.get_or_insert_with(JiraConfig::default);
                match field {
                    "url" => config.url = value.to_string(),
                    "token" => config.token = Some(value.to_string()),
                    _ => {
                        return Err(Error::Config(format!(
                            "Unknown Jira config field: {}",
                            field
                        )))
                    }
                }
            }
            _ => {
                return Err(Error::Config(format!("Unknown section: {}", section)));
            }
        }

        Ok(())
    }

    /// Get a configuration value by key path.
    ///
    /// Returns `Ok(None)` when the section is not configured.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let (section, field) = split_key(key)?;

        match section {
            "jira" => {
                let Some(config) = &self.jira else {
                    return Ok(None);
                };
                match field {
                    "url" => Ok(Some(config.url.clone())),
                    "token" => Ok(config.token.clone()),
                    _ => Err(Error::Config(format!(
                        "Unknown Jira config field: {}",
                        field
                    ))),
                }
            }
            _ => Err(Error::Config(format!("Unknown section: {}", section))),
        }
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn is_shared(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o077 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_shared(_path: &Path) -> bool {
    false
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        [section, field] => Ok((*section, *field)),
        _ => Err(Error::Config(format!(
            "Invalid config key '{}'. Expected format: section.field",
            key
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================
