//! Store configuration.
//!
//! `StoreConfig` names the snapshot key, the placeholder title and the
//! autosave quiet period. Every field has a default so a partial (or
//! missing) config file is valid.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::DEFAULT_PLACEHOLDER_TITLE;
use crate::util::normalize_text_option;

const DEFAULT_STORAGE_KEY: &str = "notes";
const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 400;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Key the snapshot is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Title written in place of a blank one
    #[serde(default = "default_placeholder_title")]
    pub placeholder_title: String,
    /// Quiet period before a debounced edit is persisted
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_placeholder_title() -> String {
    DEFAULT_PLACEHOLDER_TITLE.to_string()
}

const fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            placeholder_title: default_placeholder_title(),
            autosave_delay_ms: default_autosave_delay_ms(),
        }
    }
}

impl StoreConfig {
    pub const fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Parse a config from a raw JSON payload.
    pub fn parse(payload: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::Config(format!("invalid config JSON: {error}")))?;
        config.normalize();
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::Config(format!(
                "failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        Self::parse(&raw)
    }

    fn normalize(&mut self) {
        self.storage_key =
            normalize_text_option(Some(std::mem::take(&mut self.storage_key)))
                .unwrap_or_else(default_storage_key);
        self.placeholder_title =
            normalize_text_option(Some(std::mem::take(&mut self.placeholder_title)))
                .unwrap_or_else(default_placeholder_title);
    }
}
