//! Configuration loading and validation for processes embedding the
//! envelope core.
//!
//! All values are read from environment variables at startup. A process
//! with a missing or malformed master key must refuse to start serving
//! requests; there is no mechanism to change the key while running.

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::key::MasterKey;

/// Validated environment configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Hex-encoded 32-byte master key (64 hex characters). **Required.**
    master_key: Option<String>,

    /// Tracing log level for the host process (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Environment`] if the environment source
    /// cannot be read or deserialised. Key validation happens in
    /// [`Config::master_key`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let c: Config = cfg.try_deserialize()?;
        Ok(c)
    }

    /// Decode and validate the configured master key.
    ///
    /// The decoded key is intended to be built exactly once at startup and
    /// then passed by reference for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] if `MASTER_KEY` is unset
    /// or blank, and the decoding errors from [`MasterKey::from_hex`]
    /// otherwise.
    pub fn master_key(&self) -> Result<MasterKey, ConfigurationError> {
        let key_hex = match self.master_key.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(ConfigurationError::MissingKey),
        };
        MasterKey::from_hex(key_hex)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The key hex must never reach logs, not even in debug builds.
        f.debug_struct("Config")
            .field("master_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}
