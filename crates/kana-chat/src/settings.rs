//! Interceptor settings loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_settings.toml")` and
//! validated at build time. Settings are plain values handed to
//! [`ChatInterceptor`](crate::ChatInterceptor); there is no global instance.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use kana_core::ConversionMode;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub conversion: ConversionSettings,
    pub message: MessageSettings,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionSettings {
    #[serde(default)]
    pub mode: ConversionMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageSettings {
    pub template: String,
    #[serde(default)]
    pub kana_on_failure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupSettings {
    pub enabled: bool,
    pub endpoint: String,
    pub langpair: String,
    pub timeout_ms: u64,
}

impl LookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ChatSettings {
    /// Read and validate settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        parse_settings_toml(&content)
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<ChatSettings, SettingsError> {
    let s: ChatSettings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &ChatSettings) -> Result<(), SettingsError> {
    if !s.message.template.contains("{converted}") {
        return Err(invalid(
            "message.template",
            "must contain the {converted} placeholder",
        ));
    }
    if s.lookup.enabled {
        let endpoint = &s.lookup.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(invalid("lookup.endpoint", "must be an http(s) URL"));
        }
        if s.lookup.langpair.is_empty() {
            return Err(invalid("lookup.langpair", "must not be empty"));
        }
        if s.lookup.timeout_ms == 0 {
            return Err(invalid("lookup.timeout_ms", "must be > 0"));
        }
    }
    Ok(())
}
