//! Runtime configuration loaded from environment variables.
//!
//! | Variable                      | Default                          |
//! |-------------------------------|----------------------------------|
//! | `COUNTRY_STATS_PORT`          | `3000`                           |
//! | `COUNTRY_STATS_API_BASE`      | `https://restcountries.com/v3.1` |
//! | `COUNTRY_STATS_LOCALE`        | `en`                             |
//! | `COUNTRY_STATS_TIMEOUT_SECS`  | `30`                             |
//! | `COUNTRY_STATS_FIELDS_FILTER` | `true`                           |
//!
//! Unparseable values fall back to the default.

use std::env;
use std::time::Duration;

use num_format::Locale;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

/// Public REST Countries endpoint.
pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

/// Default HTTP timeout for upstream requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base: String,
    /// Locale tag as configured, e.g. `"de"`.
    pub locale_tag: String,
    pub timeout: Duration,
    /// Send `?fields=` so the API only returns what the reports read.
    pub fields_filter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base: DEFAULT_API_BASE.to_string(),
            locale_tag: "en".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fields_filter: true,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("COUNTRY_STATS_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let api_base = lookup("COUNTRY_STATS_API_BASE")
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or(defaults.api_base);

        let locale_tag = lookup("COUNTRY_STATS_LOCALE")
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or(defaults.locale_tag);

        let timeout = lookup("COUNTRY_STATS_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let fields_filter = lookup("COUNTRY_STATS_FIELDS_FILTER")
            .and_then(|f| parse_bool(&f))
            .unwrap_or(defaults.fields_filter);

        Self {
            port,
            api_base,
            locale_tag,
            timeout,
            fields_filter,
        }
    }

    pub fn locale(&self) -> &'static Locale {
        map_locale(&self.locale_tag)
    }
}

/// Map a user-provided locale tag to a `num_format::Locale`.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_ascii_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        "ja" | "ja_jp" => &Locale::ja,
        _ => &Locale::en,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
