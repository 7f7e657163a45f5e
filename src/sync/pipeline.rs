//! One attempt for one locale: load -> select -> request -> merge -> persist.

use crate::catalog::{CatalogStore, merge, select_gaps};
use crate::error::SyncError;
use crate::i18n::{canonical_url, display_name};
use crate::translate::{CompletionService, KeywordSet, translate_batch};

/// Outcome of a single attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    /// Entries sent to the service (0 when nothing was missing).
    pub requested: usize,
    /// Translations written to the catalog.
    pub applied: usize,
    /// Gaps left in the catalog after this attempt.
    pub remaining: usize,
}

/// Per-locale catalog pipeline sharing one service client and keyword set.
#[derive(Debug)]
pub struct Pipeline<S> {
    /// Catalog files.
    store: CatalogStore,
    /// Completion backend.
    service: S,
    /// Protected terms, loaded once.
    keywords: KeywordSet,
    /// Entries per request.
    batch_size: usize,
    /// Site base URL, for progress logs.
    site_url: String,
    /// Source locale, for progress logs.
    source_locale: String,
}

impl<S: CompletionService> Pipeline<S> {
    /// What: Assemble a pipeline.
    ///
    /// Inputs:
    /// - `store`: Catalog file access
    /// - `service`: Completion backend
    /// - `keywords`: Protected terms
    /// - `batch_size`: Entries per request (clamped by the gap selector)
    ///
    /// Output:
    /// - `Pipeline` with site metadata defaulted; see [`Self::with_site`]
    #[must_use]
    pub const fn new(store: CatalogStore, service: S, keywords: KeywordSet, batch_size: usize) -> Self {
        Self {
            store,
            service,
            keywords,
            batch_size,
            site_url: String::new(),
            source_locale: String::new(),
        }
    }

    /// Attach the site URL and source locale used in progress logs.
    #[must_use]
    pub fn with_site(mut self, site_url: impl Into<String>, source_locale: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self.source_locale = source_locale.into();
        self
    }

    /// Completion backend.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Catalog file access.
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// What: Run one attempt for `locale`.
    ///
    /// Inputs:
    /// - `locale`: Target locale code
    ///
    /// Output:
    /// - `AttemptReport` with the gap count left on disk
    ///
    /// # Errors
    /// - Returns `SyncError::CatalogRead` when the catalog cannot be loaded
    /// - Returns `SyncError::TranslationService` when the request fails
    /// - Returns `SyncError::CatalogWrite` when the merged catalog cannot be saved
    ///
    /// Details:
    /// - The catalog is re-read from disk on every attempt.
    /// - A complete catalog costs no request and no write; an attempt that
    ///   changes nothing is not written either.
    /// - An unparsable reply discards the batch, writes nothing, and reports the full backlog.
    pub async fn run_attempt(&self, locale: &str) -> Result<AttemptReport, SyncError> {
        let catalog = self.store.load(locale).await?;
        let selection = select_gaps(&catalog, self.batch_size);

        if selection.is_complete() {
            tracing::info!(locale = %locale, "catalog is fully translated, no translation needed");
            return Ok(AttemptReport {
                requested: 0,
                applied: 0,
                remaining: 0,
            });
        }
        if selection.remaining > selection.batch.len() {
            tracing::warn!(
                locale = %locale,
                remaining = selection.remaining,
                batch = selection.batch.len(),
                "more entries need translation than fit in one batch, run again or use --auto"
            );
        }

        let language_name = display_name(locale);
        tracing::info!(
            locale = %locale,
            language = %language_name,
            url = %canonical_url(&self.site_url, "/", locale, &self.source_locale),
            batch = selection.batch.len(),
            "translating {} keys ({}/{})",
            selection.batch.len(),
            catalog.len() - selection.remaining,
            catalog.len()
        );

        let accepted = match translate_batch(
            &self.service,
            &selection.batch,
            &self.keywords,
            &language_name,
            locale,
        )
        .await
        {
            Ok(accepted) => accepted,
            Err(SyncError::Parse(detail)) => {
                tracing::error!(
                    locale = %locale,
                    error = %detail,
                    "unable to parse returned JSON data, batch discarded"
                );
                return Ok(AttemptReport {
                    requested: selection.batch.len(),
                    applied: 0,
                    remaining: selection.remaining,
                });
            }
            Err(e) => return Err(e),
        };

        let merged = merge(&catalog, &accepted);
        let remaining = merged.gap_count();
        if merged == catalog {
            tracing::warn!(locale = %locale, "service returned no usable translations");
        } else {
            self.store.persist(locale, &merged).await?;
        }

        let report = AttemptReport {
            requested: selection.batch.len(),
            applied: selection.remaining.saturating_sub(remaining),
            remaining,
        };
        tracing::info!(
            locale = %locale,
            applied = report.applied,
            remaining = report.remaining,
            "batch merged"
        );
        Ok(report)
    }
}
