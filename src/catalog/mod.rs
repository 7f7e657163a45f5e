//! Per-locale message catalogs.
//!
//! # Overview
//!
//! A catalog maps a stable message key to an entry holding the source text
//! (`message`) and its translation (empty until filled). Key order follows the
//! file, and the key set is never changed by this crate: only `translation`
//! fields are written.
//!
//! - **Loading/Persisting**: [`CatalogStore`] reads `{locale}.json` and writes it back atomically
//! - **Gap Selection**: [`select_gaps`] picks the next bounded batch of untranslated keys
//! - **Merging**: [`merge`] applies accepted translations to existing keys only

mod gaps;
mod loader;
mod merge;

pub use gaps::{GapSelection, MAX_BATCH_SIZE, select_gaps};
pub use loader::CatalogStore;
pub use merge::merge;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered key -> text mapping used for batches and service responses.
pub type TranslationBatch = IndexMap<String, String>;

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Source-locale text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// Translated text; empty marks a gap.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub translation: String,
    /// Fields this crate does not interpret (origin, comments, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogEntry {
    /// Entry with the given source text and translation.
    #[must_use]
    pub fn new(message: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            translation: translation.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether this entry still lacks a translation.
    #[must_use]
    pub const fn is_gap(&self) -> bool {
        self.translation.is_empty()
    }
}

/// Reads a missing or `null` string field as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A locale's full catalog in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Entries keyed by message identifier.
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Iterate `(key, entry)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CatalogEntry)> {
        self.entries.iter()
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Number of entries whose translation is empty.
    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_gap()).count()
    }

    /// What: Overwrite the translation of an existing key.
    ///
    /// Inputs:
    /// - `key`: Message identifier
    /// - `translation`: New translated text
    ///
    /// Output:
    /// - `true` when the key existed and was updated, `false` otherwise
    ///
    /// Details:
    /// - Unknown keys are never inserted.
    pub fn set_translation(&mut self, key: &str, translation: &str) -> bool {
        self.entries.get_mut(key).is_some_and(|entry| {
            entry.translation = translation.to_string();
            true
        })
    }
}

impl FromIterator<(String, CatalogEntry)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, CatalogEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
