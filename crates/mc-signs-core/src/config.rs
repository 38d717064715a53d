use serde::Deserialize;
use std::path::Path;

use crate::error::SignError;

#[derive(Debug, Default, Deserialize)]
pub struct SignsConfig {
    #[serde(default)]
    pub signs: SignsSection,
    #[serde(default)]
    pub network: NetworkSection,
}

#[derive(Debug, Deserialize)]
pub struct SignsSection {
    /// Administrative toggle read by every handler.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Language whose lines are used when a viewer's language has none.
    #[serde(default = "default_main_language")]
    pub main_language: String,
}

fn default_enabled() -> bool {
    true
}

fn default_main_language() -> String {
    "en_GB".into()
}

impl Default for SignsSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            main_language: default_main_language(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NetworkSection {
    /// Running behind a proxy with several backends sharing one storage.
    #[serde(default)]
    pub bungeecord: bool,
    /// This backend's name, matched against sign location server tags.
    #[serde(default)]
    pub server_name: String,
}

impl SignsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SignError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SignError> {
        Ok(toml::from_str(contents)?)
    }
}
