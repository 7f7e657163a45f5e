//! Locale metadata shared by the configuration layer and the translation prompt.
//!
//! # Overview
//!
//! - **Locale Validation**: `is_valid_locale_format` accepts `language[-script][-region]` codes
//! - **Language Names**: `language_name` maps an ISO code to the name used in prompts
//! - **Canonical URLs**: `canonical_url` places source-locale pages at the site root and
//!   every other locale under `/{locale}`

mod names;

pub use names::{display_name, language_name};

/// What: Validate locale code format.
///
/// Inputs:
/// - `locale`: Locale code to validate
///
/// Output:
/// - `true` if format looks valid, `false` otherwise
///
/// Details:
/// - Allows simple language codes (e.g., "en") or full codes (e.g., "zh-Hans-CN")
/// - Rejects empty codes, spaces, special characters, and dangling or doubled hyphens
/// - Locale codes become file names, so anything path-like is rejected here
#[must_use]
pub fn is_valid_locale_format(locale: &str) -> bool {
    if locale.is_empty() || locale.len() > 20 {
        return false;
    }

    locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !locale.starts_with('-')
        && !locale.ends_with('-')
        && !locale.contains("--")
}

/// What: Build the canonical URL of a page for a given locale.
///
/// Inputs:
/// - `site_url`: Base site URL (trailing slashes are ignored)
/// - `path`: Page path, with or without a leading `/`
/// - `locale`: Locale of the page
/// - `source_locale`: Locale served from the site root
///
/// Output:
/// - Absolute URL string
///
/// Details:
/// - Source locale: `{site}{path}`; other locales: `{site}/{locale}{path}`
#[must_use]
pub fn canonical_url(site_url: &str, path: &str, locale: &str, source_locale: &str) -> String {
    let base = site_url.trim_end_matches('/');
    let path = if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if locale == source_locale {
        format!("{base}{path}")
    } else {
        format!("{base}/{locale}{path}")
    }
}
