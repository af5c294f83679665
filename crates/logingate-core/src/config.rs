//! Gate configuration management.
//!
//! The configuration holds the accepted credential and the number of failed
//! attempts allowed before lockout. It is stored at
//! `~/.config/logingate/config.json` and can be overridden from the
//! environment (`LOGINGATE_USERNAME`, `LOGINGATE_PASSWORD`,
//! `LOGINGATE_MAX_ATTEMPTS`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{validate_format, Credential};
use crate::error::ConfigError;

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "logingate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Failed attempts allowed before lockout when nothing is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub const ENV_USERNAME: &str = "LOGINGATE_USERNAME";
pub const ENV_PASSWORD: &str = "LOGINGATE_PASSWORD";
pub const ENV_MAX_ATTEMPTS: &str = "LOGINGATE_MAX_ATTEMPTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub max_attempts: u32,
    pub credential: Credential,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            credential: Credential::default(),
        }
    }
}

impl GateConfig {
    /// Load from the default config path, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            debug!(path = %path.display(), "Config loaded");
            Ok(config)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable lookup.
    /// Unset variables leave the current value alone.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup(ENV_USERNAME) {
            self.credential.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.credential.password = password;
        }
        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            self.max_attempts = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_ATTEMPTS,
                value: raw.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if !self.credential.is_complete() {
            return Err(ConfigError::EmptyCredential);
        }
        // The form trims the username, so surrounding whitespace can never match
        let username = &self.credential.username;
        if username.trim() != username.as_str() {
            return Err(ConfigError::UntrimmedUsername);
        }
        validate_format(username, &self.credential.password)
            .map_err(ConfigError::CredentialFormat)
    }
}
