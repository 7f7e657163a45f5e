//! Terms the completion service must copy through untranslated.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::SyncError;

/// Ordered, de-duplicated list of protected terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    /// Terms in first-seen order.
    words: Vec<String>,
}

impl KeywordSet {
    /// What: Parse a keyword list, one term per line.
    ///
    /// Inputs:
    /// - `text`: File content
    ///
    /// Output:
    /// - `KeywordSet` with trimmed, non-blank, unique lines
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut words: Vec<String> = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if !words.iter().any(|w| w == line) {
                words.push(line.to_string());
            }
        }
        Self { words }
    }

    /// What: Load the keyword file once before any locale work.
    ///
    /// Inputs:
    /// - `path`: Keyword list file
    ///
    /// Output:
    /// - Parsed `KeywordSet`; empty when the file does not exist
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` when the file exists but cannot be read
    pub async fn load(path: &Path) -> Result<Self, SyncError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let set = Self::from_text(&text);
                tracing::info!(path = %path.display(), count = set.len(), "keywords loaded");
                Ok(set)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "keyword file not found, no terms will be protected"
                );
                Ok(Self::default())
            }
            Err(e) => Err(SyncError::Configuration(format!(
                "failed to read keyword file {}: {e}",
                path.display()
            ))),
        }
    }

    /// Protected terms in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Number of protected terms.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no terms are protected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
