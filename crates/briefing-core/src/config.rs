use crate::error::Result;
use crate::paths;
use crate::share::DEFAULT_SHARE_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_collection_key")]
    pub collection_key: String,
}

fn default_collection_key() -> String {
    paths::PROJECTS_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            collection_key: default_collection_key(),
        }
    }
}

// ---------------------------------------------------------------------------
// ShareConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Prefix the URL-encoded payload is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Launch the share link with the system handler after printing it.
    #[serde(default)]
    pub open_browser: bool,
}

fn default_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            open_browser: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            storage: StorageConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

impl Config {
    /// Load `<root>/config.yaml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        match crate::io::read_if_exists(&path)? {
            Some(data) => Ok(serde_yaml::from_str(&data)?),
            None => Ok(Self::default()),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Err(e) = paths::validate_storage_key(&self.storage.collection_key) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("storage.collection_key: {e}"),
            });
        } else if self.storage.collection_key != paths::PROJECTS_KEY {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "storage.collection_key '{}' differs from '{}'; projects saved under the default key will not be listed",
                    self.storage.collection_key,
                    paths::PROJECTS_KEY
                ),
            });
        }

        let base = self.share.base_url.as_str();
        if base.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "share.base_url must not be empty".to_string(),
            });
        } else if !(base.starts_with("https://") || base.starts_with("http://")) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("share.base_url '{base}' is not an http(s) URL"),
            });
        }

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
