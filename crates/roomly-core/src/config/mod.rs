//! Client configuration.
//!
//! `BackendConfig` locates the hosted Supabase project; `DisplayConfig` holds
//! presentation settings such as the fixed display timezone. Both are plain
//! values: resolving them from flags, environment or profiles is up to the
//! front end.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const REST_PATH: &str = "/rest/v1";
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Connection settings for the hosted backend.
///
/// Only safe-to-ship public values belong here (project URL and anon key).
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    rest_url: String,
    anon_key: String,
}

impl BackendConfig {
    pub fn new(supabase_url: impl AsRef<str>, anon_key: impl Into<String>) -> Result<Self> {
        let rest_url = normalize_rest_url(supabase_url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(Error::Config(
                "Supabase anon key must not be empty".to_string(),
            ));
        }
        Ok(Self { rest_url, anon_key })
    }

    /// Base URL of the PostgREST API, without a trailing slash
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BackendConfig")
            .field("rest_url", &self.rest_url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Offset of the display timezone from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl DisplayConfig {
    pub fn with_utc_offset_minutes(utc_offset_minutes: i32) -> Result<Self> {
        if utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(Error::Config(format!(
                "display UTC offset {utc_offset_minutes} is outside +/-{MAX_UTC_OFFSET_MINUTES} minutes"
            )));
        }
        Ok(Self { utc_offset_minutes })
    }

    /// Fixed timezone used to render timestamps
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Build the PostgREST base URL from a Supabase project URL.
///
/// Accepts either the project URL or one that already ends in `/rest/v1`.
pub fn normalize_rest_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("Supabase URL must not be empty".to_string()));
    }
    if !is_http_url(trimmed) {
        return Err(Error::Config(
            "Supabase URL must include http:// or https://".to_string(),
        ));
    }
    if trimmed.ends_with(REST_PATH) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{REST_PATH}"))
    }
}

/// Combine optional URL and key into a config.
///
/// Both missing means "not configured" (`Ok(None)`); only one present is an
/// error.
pub fn resolve_optional_backend_config(
    url: Option<String>,
    anon_key: Option<String>,
) -> Result<Option<BackendConfig>> {
    match (normalize_text_option(url), normalize_text_option(anon_key)) {
        (None, None) => Ok(None),
        (Some(url), Some(anon_key)) => BackendConfig::new(url, anon_key).map(Some),
        (Some(_), None) => Err(Error::Config(
            "Supabase anon key is missing for the configured URL".to_string(),
        )),
        (None, Some(_)) => Err(Error::Config(
            "Supabase URL is missing for the configured anon key".to_string(),
        )),
    }
}

/// Normalize optional text by trimming whitespace and removing empties.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rest_url_appends_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co/").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn normalize_rest_url_keeps_existing_rest_path() {
        let normalized = normalize_rest_url(" https://demo.supabase.co/rest/v1 ").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn normalize_rest_url_requires_scheme() {
        assert!(normalize_rest_url("demo.supabase.co").is_err());
        assert!(normalize_rest_url("   ").is_err());
    }

    #[test]
    fn backend_config_rejects_blank_key() {
        let error = BackendConfig::new("https://demo.supabase.co", "  ").unwrap_err();
        assert!(error.to_string().contains("anon key"));
    }

    #[test]
    fn backend_config_debug_redacts_key() {
        let config = BackendConfig::new("https://demo.supabase.co", "secret-anon").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-anon"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn resolve_optional_backend_config_requires_both_values() {
        assert!(resolve_optional_backend_config(None, None).unwrap().is_none());
        assert!(resolve_optional_backend_config(Some(" ".into()), None)
            .unwrap()
            .is_none());
        assert!(
            resolve_optional_backend_config(Some("https://demo.supabase.co".into()), None)
                .is_err()
        );
        let config = resolve_optional_backend_config(
            Some("https://demo.supabase.co".into()),
            Some("anon".into()),
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.rest_url(), "https://demo.supabase.co/rest/v1");
        assert_eq!(config.anon_key(), "anon");
    }

    #[test]
    fn display_config_bounds_offset() {
        assert!(DisplayConfig::with_utc_offset_minutes(60).is_ok());
        assert!(DisplayConfig::with_utc_offset_minutes(-19 * 60).is_err());
        assert_eq!(
            DisplayConfig::default().timezone(),
            FixedOffset::east_opt(0).unwrap()
        );
        assert_eq!(
            DisplayConfig::with_utc_offset_minutes(90).unwrap().timezone(),
            FixedOffset::east_opt(5400).unwrap()
        );
    }
}
