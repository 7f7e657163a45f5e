//! Heuristic repair of almost-JSON returned by the completion service.
//!
//! Repairs are independent text rules applied in a fixed order, and the
//! caller re-parses exactly once afterwards.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::SyncError;

/// Runs of ASCII control characters (raw newlines, tabs, NULs, ...).
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1F]+").expect("valid control char pattern"));
/// A comma directly after an opening bracket.
static LEADING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\[{])\s*,").expect("valid leading comma pattern"));
/// A comma directly before a closing bracket.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").expect("valid trailing comma pattern"));

/// A single text-to-text repair.
pub type RepairRule = fn(&str) -> String;

/// Repair rules in application order.
pub const REPAIR_RULES: &[(&str, RepairRule)] = &[
    ("strip_control_chars", strip_control_chars),
    ("insert_missing_commas", insert_missing_commas),
    ("remove_leading_commas", remove_leading_commas),
    ("remove_trailing_commas", remove_trailing_commas),
];

/// Remove ASCII control characters anywhere in the text.
#[must_use]
pub fn strip_control_chars(input: &str) -> String {
    CONTROL_CHARS.replace_all(input, "").into_owned()
}

/// Drop commas that directly follow `[` or `{`.
#[must_use]
pub fn remove_leading_commas(input: &str) -> String {
    LEADING_COMMA.replace_all(input, "$1").into_owned()
}

/// Drop commas that directly precede `]` or `}`.
#[must_use]
pub fn remove_trailing_commas(input: &str) -> String {
    TRAILING_COMMA.replace_all(input, "$1").into_owned()
}

/// Kind of the last significant token seen outside strings.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    /// Start of input, `:`, `,`, or an opening bracket.
    Separator,
    /// Closing quote, `}` or `]`.
    Closer,
    /// Character of a bare literal (number, `true`, `null`, ...).
    Literal,
}

/// What: Insert a comma between a value and the next value or key when missing.
///
/// Inputs:
/// - `input`: JSON-like text
///
/// Output:
/// - Text with `,` added after a value that is directly followed (ignoring
///   whitespace) by another value or key
///
/// Details:
/// - Tracks string state, so quotes and brackets inside string values are left alone.
/// - Bare literals only count as adjacent when whitespace separates them.
#[must_use]
pub fn insert_missing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut in_string = false;
    let mut escaped = false;
    let mut prev = Prev::Separator;
    // Byte offset in `out` just past the last value-ending token.
    let mut value_end = 0;
    let mut spaced = false;

    for c in input.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                prev = Prev::Closer;
                value_end = out.len();
                spaced = false;
            }
            continue;
        }
        if c.is_whitespace() {
            out.push(c);
            spaced = true;
            continue;
        }
        let is_literal = c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+');
        let starts_value = matches!(c, '"' | '{' | '[')
            || (is_literal && (prev == Prev::Closer || (prev == Prev::Literal && spaced)));
        if starts_value && prev != Prev::Separator {
            out.insert(value_end, ',');
        }
        out.push(c);
        spaced = false;
        match c {
            '"' => in_string = true,
            '}' | ']' => {
                prev = Prev::Closer;
                value_end = out.len();
            }
            _ if is_literal => {
                prev = Prev::Literal;
                value_end = out.len();
            }
            _ => prev = Prev::Separator,
        }
    }
    out
}

/// Apply every rule in [`REPAIR_RULES`] in order.
#[must_use]
pub fn repair_json(input: &str) -> String {
    REPAIR_RULES
        .iter()
        .fold(input.to_string(), |text, (_, rule)| rule(&text))
}

/// What: Parse service output as JSON, repairing it once on failure.
///
/// Inputs:
/// - `text`: Raw response text
///
/// Output:
/// - Parsed JSON value
///
/// # Errors
/// - Returns `SyncError::Parse` when the repaired text still does not parse
pub fn parse_with_repair(text: &str) -> Result<Value, SyncError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::warn!(error = %first, "JSON parsing failed, attempting to fix");
            let repaired = repair_json(text);
            serde_json::from_str(&repaired).map_err(|e| {
                tracing::warn!(error = %e, "still unable to parse JSON after fix");
                SyncError::Parse(e.to_string())
            })
        }
    }
}
