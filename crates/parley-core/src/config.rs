//! Chat configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Configuration for an interactive chat session, loaded from TOML.
///
/// Every field has a default, so an empty file (or no file at all) yields
/// a fully working configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Prompt shown before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Case-insensitive keyword that terminates the session.
    #[serde(default = "default_exit_keyword")]
    pub exit_keyword: String,
}

fn default_prompt() -> String {
    "User: ".to_string()
}

fn default_exit_keyword() -> String {
    "exit".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            exit_keyword: default_exit_keyword(),
        }
    }
}

impl ChatConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for files that exist but cannot be read or
    /// parsed; a missing file is not an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
