//! Bot settings, loaded from json. Every field is optional and falls back
//! to the values the live game uses.
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::vision::Palette;

/// Failure to load a [`BotConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[allow(missing_docs)]
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[allow(missing_docs)]
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything that can be tuned without a rebuild
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BotConfig {
    /// colors the board is drawn in
    pub palette: Palette,
    #[allow(missing_docs)]
    pub poll: PollConfig,
}

/// Settings for [`crate::poll::PollCoordinator`]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PollConfig {
    /// how long before a poll closes the bot checks it for votes
    pub vote_margin_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            vote_margin_secs: 60,
        }
    }
}

impl PollConfig {
    #[allow(missing_docs)]
    pub fn vote_margin(&self) -> Duration {
        Duration::from_secs(self.vote_margin_secs)
    }
}

impl BotConfig {
    #[allow(missing_docs)]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a json file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
