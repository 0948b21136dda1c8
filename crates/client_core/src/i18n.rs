//! Localized string lookup and the loader that signals readiness.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::readiness::Readiness;

pub const SEARCHING: &str = "searching";
pub const SEARCHING_ERROR: &str = "searching_error";
pub const SEARCH_NO_RESULTS: &str = "search_no_results";

pub trait Translate: Send + Sync {
    /// Resolves `key`. Unknown keys resolve to the key itself.
    fn translate(&self, key: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let strings = [
            (SEARCHING, "Searching..."),
            (SEARCHING_ERROR, "Searching failed"),
            (SEARCH_NO_RESULTS, "No results found"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        Self { strings }
    }
}

impl Catalog {
    /// Parses a flat `key = "value"` TOML document over the built-in defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let overrides: HashMap<String, String> =
            toml::from_str(raw).context("locale file must be a flat table of strings")?;
        let mut catalog = Self::default();
        catalog.strings.extend(overrides);
        Ok(catalog)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read locale file '{}'", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse locale file '{}'", path.display()))
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Shared string store. Serves built-in defaults until a locale file has been
/// loaded, then flips its [`Readiness`].
pub struct Localizer {
    catalog: RwLock<Catalog>,
    readiness: Readiness,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            readiness: Readiness::new(),
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness.clone()
    }

    pub fn install(&self, catalog: Catalog) {
        let mut guard = self
            .catalog
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = catalog;
    }

    /// Loads `path` if given and marks the store ready. A missing or broken
    /// file keeps the defaults; readiness is signalled either way.
    pub async fn load_from(&self, path: Option<PathBuf>) {
        if let Some(path) = path {
            match Catalog::load(&path).await {
                Ok(catalog) => {
                    info!(path = %path.display(), "i18n: locale loaded");
                    self.install(catalog);
                }
                Err(err) => warn!("i18n: using built-in strings: {err:#}"),
            }
        }
        self.readiness.mark_ready();
    }
}

impl Translate for Localizer {
    fn translate(&self, key: &str) -> String {
        self.catalog
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .translate(key)
    }
}
