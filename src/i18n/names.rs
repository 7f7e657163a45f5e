//! Language display names keyed by locale code.

/// Known locale codes and the language name the completion service is given.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("de", "Deutsch"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("hi", "हिन्दी"),
    ("id", "Bahasa Indonesia"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("nl", "Nederlands"),
    ("pl", "Polski"),
    ("pt", "Português"),
    ("pt-BR", "Português (Brasil)"),
    ("ru", "Русский"),
    ("th", "ไทย"),
    ("tr", "Türkçe"),
    ("uk", "Українська"),
    ("vi", "Tiếng Việt"),
    ("zh", "简体中文"),
    ("zh-TW", "繁體中文"),
];

/// What: Look up the native name of a language.
///
/// Inputs:
/// - `code`: Locale code (e.g., "zh", "pt-BR")
///
/// Output:
/// - `Some(name)` for known codes, `None` otherwise
///
/// Details:
/// - Tries the exact code first, then the bare language subtag (`de-CH` -> `de`)
#[must_use]
pub fn language_name(code: &str) -> Option<&'static str> {
    let lookup = |c: &str| {
        LANGUAGE_NAMES
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(c))
            .map(|(_, name)| *name)
    };
    lookup(code).or_else(|| code.split('-').next().and_then(lookup))
}

/// Language name for prompts and logs, falling back to the code itself.
#[must_use]
pub fn display_name(code: &str) -> String {
    language_name(code).map_or_else(|| code.to_string(), str::to_string)
}
