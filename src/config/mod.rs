//! Run configuration: supported locales, source locale, site URL, and
//! the knobs of the translation pipeline.
//!
//! The configuration is read once at startup from a TOML file and passed by
//! value into the pipeline and scheduler. A missing file means defaults.

mod credentials;
mod paths;

pub use credentials::{API_KEY_ENV, ApiKey};
pub use paths::{CONFIG_ENV, CONFIG_FILE_NAME, find_config_file};

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::MAX_BATCH_SIZE;
use crate::error::SyncError;
use crate::i18n::is_valid_locale_format;

/// Settings for one catalog synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Every supported locale code, source included.
    pub locales: Vec<String>,
    /// Locale the catalogs are extracted from; never translated.
    pub source_locale: String,
    /// Base URL of the localized site.
    pub site_url: String,
    /// Directory holding one `{locale}.json` catalog per locale.
    pub locales_dir: PathBuf,
    /// Plain-text list of terms that must never be translated.
    pub keywords_path: PathBuf,
    /// Model identifier sent to the completion service.
    pub model: String,
    /// Base URL of the completion API.
    pub api_base: String,
    /// Per-request timeout for the completion service.
    pub request_timeout_secs: u64,
    /// Number of locales processed at the same time.
    pub concurrency: usize,
    /// Maximum entries per request (never above [`MAX_BATCH_SIZE`]).
    pub batch_size: usize,
    /// Upper bound on passes for a single locale in auto mode.
    pub max_auto_passes: usize,
    /// Consecutive auto-mode passes without progress before giving up.
    pub stall_limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "zh".to_string()],
            source_locale: "en".to_string(),
            site_url: "https://example.com".to_string(),
            locales_dir: PathBuf::from("src/locales"),
            keywords_path: PathBuf::from("scripts/keywords.txt"),
            model: "gpt-4o-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 120,
            concurrency: 3,
            batch_size: MAX_BATCH_SIZE,
            max_auto_passes: 100,
            stall_limit: 3,
        }
    }
}

impl SyncConfig {
    /// What: Parse and validate a configuration from TOML text.
    ///
    /// Inputs:
    /// - `text`: TOML document; omitted keys take their defaults
    ///
    /// Output:
    /// - Validated `SyncConfig`
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` on TOML syntax errors, unknown keys, or failed validation
    pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| SyncError::Configuration(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// What: Load the configuration file, or defaults when none exists.
    ///
    /// Inputs:
    /// - `path`: Explicit file, or `None` to search with [`find_config_file`]
    ///
    /// Output:
    /// - Validated `SyncConfig`
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` when the file cannot be read or is invalid
    pub async fn load(path: Option<&Path>) -> Result<Self, SyncError> {
        let Some(path) = path.map(Path::to_path_buf).or_else(find_config_file) else {
            tracing::info!("no configuration file found, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            SyncError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), locales = ?config.locales, "configuration loaded");
        Ok(config)
    }

    /// What: Check invariants the pipeline relies on.
    ///
    /// Output:
    /// - `Ok(())` when the configuration is usable
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` naming the first violated rule
    pub fn validate(&self) -> Result<(), SyncError> {
        if let Some(bad) = self.locales.iter().find(|l| !is_valid_locale_format(l)) {
            return Err(SyncError::Configuration(format!(
                "invalid locale code '{bad}'"
            )));
        }
        if !self.locales.contains(&self.source_locale) {
            return Err(SyncError::Configuration(format!(
                "source locale '{}' is not listed in locales",
                self.source_locale
            )));
        }
        if self.concurrency == 0 {
            return Err(SyncError::Configuration(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(SyncError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.site_url.trim().is_empty() {
            return Err(SyncError::Configuration("site_url is empty".to_string()));
        }
        Ok(())
    }

    /// Batch size clamped to the hard per-request cap.
    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }

    /// Configured locales without the source locale, in configuration order.
    #[must_use]
    pub fn target_locales(&self) -> Vec<String> {
        self.locales
            .iter()
            .filter(|l| **l != self.source_locale)
            .cloned()
            .collect()
    }
}
