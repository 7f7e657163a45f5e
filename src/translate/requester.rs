//! One batch, one request: prompt, call, parse, filter.

use serde_json::Value;

use super::{CompletionService, KeywordSet, build_prompt, parse_with_repair};
use crate::catalog::TranslationBatch;
use crate::error::SyncError;

/// What: Translate one batch through the completion service.
///
/// Inputs:
/// - `service`: Completion backend
/// - `batch`: Keys and source texts (at most the batch cap)
/// - `keywords`: Terms to keep verbatim
/// - `language_name`: Target language display name
/// - `locale`: Target locale code
///
/// Output:
/// - Accepted translations, restricted to keys of `batch`
///
/// # Errors
/// - Returns `SyncError::TranslationService` when the request fails (not retried here)
/// - Returns `SyncError::Parse` when the response is not a JSON object even after repair
///
/// Details:
/// - Sends exactly one request.
/// - Logs the raw response at debug level.
pub async fn translate_batch<S: CompletionService>(
    service: &S,
    batch: &TranslationBatch,
    keywords: &KeywordSet,
    language_name: &str,
    locale: &str,
) -> Result<TranslationBatch, SyncError> {
    let prompt = build_prompt(batch, keywords, language_name, locale);
    let reply = service.complete(&prompt).await?;
    tracing::debug!(locale = %locale, response = %reply, "completion service response");
    parse_response(&reply, batch)
}

/// What: Turn a raw service reply into accepted translations.
///
/// Inputs:
/// - `reply`: Raw response text
/// - `batch`: Batch the reply answers
///
/// Output:
/// - Key -> translation for keys present in both the batch and the reply
///
/// # Errors
/// - Returns `SyncError::Parse` when the reply is not (repairable into) a JSON object
///
/// Details:
/// - Keys not in the batch are dropped.
/// - Batch keys missing from the reply, or mapped to empty or non-string values,
///   stay untranslated.
/// - Result follows batch order.
pub fn parse_response(reply: &str, batch: &TranslationBatch) -> Result<TranslationBatch, SyncError> {
    let Value::Object(map) = parse_with_repair(reply)? else {
        return Err(SyncError::Parse("expected a JSON object".to_string()));
    };

    let dropped = map.keys().filter(|k| !batch.contains_key(*k)).count();
    if dropped > 0 {
        tracing::debug!(dropped, "ignoring keys not present in the request batch");
    }

    let accepted: TranslationBatch = batch
        .keys()
        .filter_map(|key| match map.get(key) {
            Some(Value::String(text)) if !text.is_empty() => Some((key.clone(), text.clone())),
            _ => None,
        })
        .collect();
    Ok(accepted)
}
