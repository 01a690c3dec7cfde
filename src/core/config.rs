//! Engine configuration.
//!
//! [`EngineConfig`] is built once and handed to [`crate::core::engine::Engine`]
//! at construction time; nothing reads configuration from globals. The
//! defaults are what an unconfigured install uses: remote `origin`, a walk cap
//! of 10 000 commits per direction and the conventional SSH key names.

use crate::core::dirs::get_config_directory;
use crate::core::error::GitwappError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Remote used for ahead/behind, push and pull
    pub remote_name: String,
    /// Maximum commits visited per ahead/behind walk before giving up
    pub max_walk: usize,
    /// Key file names tried under `~/.ssh`, in order
    pub ssh_key_names: Vec<String>,
    /// Username offered to SSH when the remote URL carries none
    pub ssh_username: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            remote_name: "origin".to_string(),
            max_walk: 10_000,
            ssh_key_names: vec![
                "id_ed25519".to_string(),
                "id_rsa".to_string(),
                "id_ecdsa".to_string(),
            ],
            ssh_username: "git".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load `config.json` from the per-user config directory, falling back to
    /// defaults when it does not exist.
    pub fn load() -> Result<Self, GitwappError> {
        let config_dir = get_config_directory()?;
        Self::load_from(&config_dir.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, GitwappError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Candidate private key paths under the given home directory
    pub fn ssh_key_paths(&self, home: &Path) -> Vec<PathBuf> {
        self.ssh_key_names
            .iter()
            .map(|name| home.join(".ssh").join(name))
            .collect()
    }
}
