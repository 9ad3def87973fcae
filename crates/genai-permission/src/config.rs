// config.rs — Client configuration.
//
// Read from TOML, by default `<config dir>/genai/config.toml`:
//
//   [request]
//   timeout_secs = 120
//
//   [list]
//   page_size = 100
//
//   [local]
//   store_path = ".genai/permissions.json"
//
// Every section is optional. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::service::RequestOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub request: RequestConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub local: LocalConfig,
}

/// Options forwarded on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Per-call timeout in seconds. Unset means the service default.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Page size for list calls. Unset lets the service choose.
    pub page_size: Option<u32>,
}

/// Settings for the local file-backed service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".genai").join("permissions.json")
}

impl ClientConfig {
    /// Default location: `<platform config dir>/genai/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("genai").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists; defaults otherwise. Parse errors still fail.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("ClientConfig: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            timeout: self.request.timeout_secs.map(Duration::from_secs),
        }
    }
}
