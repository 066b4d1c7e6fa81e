//! Prompt configuration loader for local files and in-memory sources.
//! The loaded model is swapped wholesale using ArcSwap, so readers never
//! observe a half-applied reload.

use super::document::build_config;
use super::format::{decode_source, ConfigFormat};
use super::{ConfigError, PromptConfig, PromptDefinition};
use crate::{Error, Result};
use arc_swap::{ArcSwap, ArcSwapOption};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable naming the configuration file for [`PromptLoader::from_env`].
pub const CONFIG_ENV_VAR: &str = "PROMPTKIT_CONFIG";

/// Searched in order when [`CONFIG_ENV_VAR`] is unset.
pub const DEFAULT_LOCATIONS: [&str; 3] = [
    "prompts.toml",
    "config/prompts.toml",
    ".promptkit/prompts.toml",
];

const MAX_HINTED_NAMES: usize = 10;

/// Loads prompt configuration and holds the current [`PromptConfig`].
pub struct PromptLoader {
    config: ArcSwap<PromptConfig>,
    source: ArcSwapOption<PathBuf>,
}

impl PromptLoader {
    /// Empty loader; every lookup fails until something is loaded.
    pub fn new() -> Self {
        Self {
            config: ArcSwap::from_pointee(PromptConfig::default()),
            source: ArcSwapOption::empty(),
        }
    }

    /// Create a loader and load `path` into it.
    pub async fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let loader = Self::new();
        loader.load(path).await?;
        Ok(loader)
    }

    /// Create a loader from [`CONFIG_ENV_VAR`] or the first existing
    /// [`DEFAULT_LOCATIONS`] entry.
    pub async fn from_env() -> std::result::Result<Self, ConfigError> {
        let path = Self::resolve_config_path().ok_or_else(|| ConfigError::LoadError {
            path: format!("${}", CONFIG_ENV_VAR),
            reason: "no prompt configuration file found".to_string(),
            hint: Some(format!(
                "Set {} or create one of: {}",
                CONFIG_ENV_VAR,
                DEFAULT_LOCATIONS.join(", ")
            )),
        })?;
        Self::from_path(path).await
    }

    /// Where [`PromptLoader::from_env`] would read from, if anywhere.
    pub fn resolve_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = path.trim();
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        DEFAULT_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
    }

    /// Read `path` and replace the current configuration with it.
    ///
    /// The format follows the file extension (see [`ConfigFormat::from_path`]).
    /// On failure the previously loaded configuration stays in place.
    pub async fn load(
        &self,
        path: impl AsRef<Path>,
    ) -> std::result::Result<Arc<PromptConfig>, ConfigError> {
        let path = path.as_ref();
        let shown = path.to_string_lossy().to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ConfigError::LoadError {
                path: shown.clone(),
                reason: e.to_string(),
                hint: Some("Check if the file exists and you have read permissions.".to_string()),
            })?;
        let content = decode_source(bytes, &shown)?;

        let config = self.install(&content, ConfigFormat::from_path(path))?;
        self.source.store(Some(Arc::new(path.to_path_buf())));
        info!(path = %shown, prompts = config.len(), "loaded prompt configuration");
        Ok(config)
    }

    /// Replace the current configuration with `content`.
    ///
    /// Clears the remembered file path, so a later [`PromptLoader::reload`]
    /// fails instead of resurrecting an older file.
    pub fn load_str(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> std::result::Result<Arc<PromptConfig>, ConfigError> {
        let config = self.install(content, format)?;
        self.source.store(None);
        debug!(%format, prompts = config.len(), "loaded prompt configuration from memory");
        Ok(config)
    }

    /// Re-read the file last passed to [`PromptLoader::load`].
    pub async fn reload(&self) -> std::result::Result<Arc<PromptConfig>, ConfigError> {
        let path = self.source.load_full().ok_or_else(|| ConfigError::LoadError {
            path: "<none>".to_string(),
            reason: "no configuration file has been loaded".to_string(),
            hint: Some("Call PromptLoader::load with a path first".to_string()),
        })?;
        self.load(path.as_path()).await
    }

    fn install(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> std::result::Result<Arc<PromptConfig>, ConfigError> {
        let document = format.parse(content)?;
        let config = Arc::new(build_config(document)?);
        self.config.store(Arc::clone(&config));
        Ok(config)
    }

    /// Current configuration. Later loads do not affect a snapshot already taken.
    pub fn snapshot(&self) -> Arc<PromptConfig> {
        self.config.load_full()
    }

    /// Look up one prompt definition.
    pub fn get(&self, name: &str) -> Result<Arc<PromptDefinition>> {
        let config = self.config.load();
        config.get(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
            hint: Some(not_found_hint(&config)),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.config.load().contains(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.config
            .load()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.config.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.load().is_empty()
    }

    /// File the current configuration came from, if it came from a file.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.source.load_full().map(|p| p.as_ref().clone())
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PromptLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptLoader")
            .field("prompts", &self.len())
            .field("source", &self.source_path())
            .finish()
    }
}

fn not_found_hint(config: &PromptConfig) -> String {
    if config.is_empty() {
        return "No prompts are loaded; call PromptLoader::load first".to_string();
    }
    let names = config.names();
    let mut hint = format!(
        "Available prompts: {}",
        names
            .iter()
            .take(MAX_HINTED_NAMES)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    );
    if names.len() > MAX_HINTED_NAMES {
        hint.push_str(&format!(" (and {} more)", names.len() - MAX_HINTED_NAMES));
    }
    hint
}
