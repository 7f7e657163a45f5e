//! Applying accepted translations to a loaded catalog.

use super::{Catalog, TranslationBatch};

/// What: Apply accepted translations to a copy of a catalog.
///
/// Inputs:
/// - `catalog`: Catalog as loaded for this attempt
/// - `accepted`: Key -> translated text, already filtered to the request batch
///
/// Output:
/// - Updated catalog with the same key set
///
/// Details:
/// - Keys absent from `catalog` are skipped, never created.
/// - Empty translations are skipped so the entry stays a gap.
#[must_use]
pub fn merge(catalog: &Catalog, accepted: &TranslationBatch) -> Catalog {
    let mut merged = catalog.clone();
    for (key, text) in accepted {
        if text.is_empty() {
            continue;
        }
        if !merged.set_translation(key, text) {
            tracing::debug!(key = %key, "skipping translation for unknown key");
        }
    }
    merged
}
