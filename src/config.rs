//! Configuration file parser for ~/.config/vitrine/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! The owner scope lives here and is threaded into the store at
//! construction time; nothing reads it from ambient process state after
//! startup. Environment overrides (`VITRINE_OWNER_ID`, `VITRINE_DB`) take
//! precedence over the file.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Owner identity scoping every read and write. Fixed per deployment.
    pub owner_id: String,

    /// Path to the SQLite content database.
    pub database_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner_id: "local".to_string(),
            database_path: "vitrine.db".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Flag probable typos without rejecting the file
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["owner_id", "database_path"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), owner = %config.owner_id, "Loaded configuration");
        Ok(config)
    }

    /// Apply `VITRINE_OWNER_ID` and `VITRINE_DB` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(owner) = std::env::var("VITRINE_OWNER_ID") {
            if !owner.trim().is_empty() {
                self.owner_id = owner;
            }
        }
        if let Ok(db) = std::env::var("VITRINE_DB") {
            if !db.trim().is_empty() {
                self.database_path = db;
            }
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
