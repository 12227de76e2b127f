use std::fmt;
use std::str::FromStr;

use crate::core::config::data::Config;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Keys accepted by `qanat set` / `qanat unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Model,
    BaseUrl,
    ApiKey,
    Theme,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::Model,
        ConfigKey::BaseUrl,
        ConfigKey::ApiKey,
        ConfigKey::Theme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Model => "model",
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::ApiKey => "api-key",
            ConfigKey::Theme => "theme",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown config key: {s} (expected one of: {})", known.join(", "))
            })
    }
}

impl Config {
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// The environment value wins over the stored key; blank values count as unset.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|v| !v.trim().is_empty()))
    }

    pub fn set_value(&mut self, key: ConfigKey, value: String) {
        let slot = self.slot_mut(key);
        *slot = Some(value);
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        *self.slot_mut(key) = None;
    }

    pub fn get_value(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::Model => self.model.as_deref(),
            ConfigKey::BaseUrl => self.base_url.as_deref(),
            ConfigKey::ApiKey => self.api_key.as_deref(),
            ConfigKey::Theme => self.theme.as_deref(),
        }
    }

    fn slot_mut(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key {
            ConfigKey::Model => &mut self.model,
            ConfigKey::BaseUrl => &mut self.base_url,
            ConfigKey::ApiKey => &mut self.api_key,
            ConfigKey::Theme => &mut self.theme,
        }
    }
}
