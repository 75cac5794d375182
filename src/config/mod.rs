//! Configuration management.
//!
//! Settings are resolved with the same priority everywhere:
//! 1. Explicit CLI flag
//! 2. Environment variable (`WILLOW_API_TOKEN`, `WILLOW_API_URL`)
//! 3. Built-in default
//!
//! A token is mandatory for commands that talk to the API, except in
//! dry-run mode.

use crate::api::ApiClient;
use crate::error::{Error, Result};

/// Default willow.camp API base address.
pub const DEFAULT_API_URL: &str = "https://willow.camp";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "WILLOW_API_TOKEN";

/// Environment variable overriding the API base address.
pub const API_URL_ENV: &str = "WILLOW_API_URL";

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub token: Option<String>,
    pub dry_run: bool,
}

impl Settings {
    /// Resolve settings from explicit values, then environment, then defaults.
    #[must_use]
    pub fn resolve(token: Option<&str>, api_url: Option<&str>, dry_run: bool) -> Self {
        Self {
            api_url: resolve_api_url(api_url),
            token: resolve_token(token),
            dry_run,
        }
    }

    /// Fail with [`Error::MissingToken`] unless a token is set or this is a dry run.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured outside dry-run mode.
    pub fn require_token(&self) -> Result<()> {
        if self.token.is_none() && !self.dry_run {
            return Err(Error::MissingToken);
        }
        Ok(())
    }

    /// Build an API client from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.api_url, self.token.clone())?)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolve the bearer token.
///
/// Priority: explicit flag, then `WILLOW_API_TOKEN`. Blank values count as unset.
#[must_use]
pub fn resolve_token(explicit: Option<&str>) -> Option<String> {
    if let Some(token) = explicit.and_then(non_empty) {
        return Some(token);
    }

    std::env::var(TOKEN_ENV).ok().as_deref().and_then(non_empty)
}

/// Resolve the API base address.
///
/// Priority: explicit flag, then `WILLOW_API_URL`, then [`DEFAULT_API_URL`].
#[must_use]
pub fn resolve_api_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit.and_then(non_empty) {
        return url;
    }

    std::env::var(API_URL_ENV)
        .ok()
        .as_deref()
        .and_then(non_empty)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let settings = Settings::resolve(Some("abc"), Some("http://localhost:3000"), false);
        assert_eq!(settings.token.as_deref(), Some("abc"));
        assert_eq!(settings.api_url, "http://localhost:3000");
    }

    #[test]
    fn test_blank_explicit_token_is_ignored() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(" tok "), Some("tok".to_string()));
    }

    #[test]
    fn test_require_token() {
        let live = Settings {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            dry_run: false,
        };
        assert!(matches!(live.require_token(), Err(Error::MissingToken)));

        let dry = Settings {
            dry_run: true,
            ..live.clone()
        };
        assert!(dry.require_token().is_ok());

        let with_token = Settings {
            token: Some("t".to_string()),
            ..live
        };
        assert!(with_token.require_token().is_ok());
    }
}
