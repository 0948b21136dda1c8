use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::controller::{ControllerConfig, DEFAULT_VIEWER_TARGET};

pub const SETTINGS_FILE: &str = "docsearch.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("base_url '{url}' is not an absolute URL: {source}")]
    RelativeBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base_url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("viewer_target must not be empty")]
    EmptyViewerTarget,
    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub placeholder_term: String,
    pub viewer_target: String,
    #[serde(default)]
    pub locale_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/search?q=".into(),
            placeholder_term: "getting started".into(),
            viewer_target: DEFAULT_VIEWER_TARGET.into(),
            locale_path: None,
            request_timeout_secs: 30,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            base_url: self.base_url.clone(),
            viewer_target: self.viewer_target.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let parsed = Url::parse(&self.base_url).map_err(|source| SettingsError::RelativeBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(self.base_url.clone()));
        }
        if self.viewer_target.trim().is_empty() {
            return Err(SettingsError::EmptyViewerTarget);
        }
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Defaults, then `docsearch.toml` in the working directory, then `APP__*`
/// environment variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), app_environment())
}

pub fn app_environment() -> Environment {
    Environment::with_prefix("APP").separator("__")
}

pub fn load_settings_from(file: &Path, env: Environment) -> Result<Settings> {
    let defaults = Settings::default();
    let config = Config::builder()
        .set_default("base_url", defaults.base_url)?
        .set_default("placeholder_term", defaults.placeholder_term)?
        .set_default("viewer_target", defaults.viewer_target)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
        .set_default("log_level", defaults.log_level)?
        .add_source(File::from(file).required(false))
        .add_source(env.try_parsing(true))
        .build()
        .context("failed to assemble settings")?;

    let settings: Settings = config
        .try_deserialize()
        .context("failed to deserialize settings")?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
