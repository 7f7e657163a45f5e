//! Completion service credential.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::SyncError;

/// Environment variable holding the completion service API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// API key wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// What: Read the API key from the process environment.
    ///
    /// Output:
    /// - `ApiKey` when `OPENAI_API_KEY` is set and non-blank
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` when the variable is absent or blank
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// What: Read the API key through an arbitrary variable lookup.
    ///
    /// Inputs:
    /// - `lookup`: Resolves a variable name to its value
    ///
    /// Output:
    /// - `ApiKey` with surrounding whitespace trimmed
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` when the lookup yields nothing usable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let raw = Zeroizing::new(lookup(API_KEY_ENV).unwrap_or_default());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SyncError::Configuration(format!("{API_KEY_ENV} is not set")));
        }
        Ok(Self(Zeroizing::new(trimmed.to_string())))
    }

    /// Secret value, for building the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
