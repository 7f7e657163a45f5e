//! Selection of the next batch of untranslated keys.

use super::{Catalog, TranslationBatch};

/// Hard upper bound on entries sent in one request.
pub const MAX_BATCH_SIZE: usize = 20;

/// Result of scanning a catalog for gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapSelection {
    /// Up to `cap` untranslated keys with their source text, in catalog order.
    pub batch: TranslationBatch,
    /// Total untranslated keys in the catalog, batch included.
    pub remaining: usize,
}

impl GapSelection {
    /// Whether the catalog has nothing left to translate.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// What: Pick the next batch of keys still lacking a translation.
///
/// Inputs:
/// - `catalog`: Catalog to scan
/// - `cap`: Requested batch size, clamped to `1..=MAX_BATCH_SIZE`
///
/// Output:
/// - `GapSelection` with the first qualifying keys and the full gap count
///
/// Details:
/// - Keys are taken first-come in catalog order.
/// - Counting continues past the cap so callers see the true backlog.
#[must_use]
pub fn select_gaps(catalog: &Catalog, cap: usize) -> GapSelection {
    let cap = cap.clamp(1, MAX_BATCH_SIZE);
    let mut selection = GapSelection::default();
    for (key, entry) in catalog.iter().filter(|(_, e)| e.is_gap()) {
        if selection.batch.len() < cap {
            selection.batch.insert(key.clone(), entry.message.clone());
        }
        selection.remaining += 1;
    }
    selection
}
