//! Instruction text sent to the completion service.

use super::KeywordSet;
use crate::catalog::TranslationBatch;

/// Marker line preceding the serialized batch.
pub const INPUT_MARKER: &str = "- Input JSON data:";

/// What: Build the translation instruction for one batch.
///
/// Inputs:
/// - `batch`: Keys and source texts to translate
/// - `keywords`: Terms that must be kept verbatim
/// - `language_name`: Target language display name (e.g., "简体中文")
/// - `locale`: Target locale code (e.g., "zh")
///
/// Output:
/// - Complete user-role prompt
///
/// Details:
/// - Asks for a bare JSON object with the same keys, no code fences or commentary.
/// - Lists every keyword verbatim, comma separated.
/// - The batch is the last section, pretty printed after [`INPUT_MARKER`].
#[must_use]
pub fn build_prompt(
    batch: &TranslationBatch,
    keywords: &KeywordSet,
    language_name: &str,
    locale: &str,
) -> String {
    let input = serde_json::to_string_pretty(batch).unwrap_or_else(|_| "{}".to_string());
    let keyword_list = keywords.as_slice().join(", ");
    format!(
        "
You are a translator for software user interfaces and know how to handle JSON data precisely.

- Use a professional, formal register suitable for official product documentation.
- Prefer natural local phrasing over word-for-word translation; read each string in context.
- Translate every value into {language_name} (ISO code: {locale}).
- Reply with a single JSON object whose keys are exactly the input keys and whose values are the translations.
- Output only the JSON object. Do not wrap it in ```json``` fences and do not add explanations.
- Make sure the JSON is valid and every key has a value.

- IMPORTANT: The following keywords MUST NOT be translated. Keep them exactly as written, including case and punctuation. Check your output to confirm they are unchanged.

{keyword_list}

{INPUT_MARKER}

{input}
"
    )
}
