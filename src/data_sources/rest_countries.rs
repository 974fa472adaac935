//! REST Countries client.
//!
//! REST Countries serves metadata for every country: names, population, region,
//! languages, currencies and more. Two endpoints are used:
//!
//! - `GET /all` - every country
//! - `GET /name/{name}` - countries whose common or official name matches `name`
//!   (matching is done by the API and is substring based)
//!
//! # API Reference
//!
//! See: <https://restcountries.com>

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_API_BASE};
use crate::error::{FetchError, FetchKind};
use crate::model::{CountryList, CountryRecord, RawCountry};

/// Fields requested from the API when filtering is enabled.
pub const REPORT_FIELDS: &str = "name,population,region,languages,currencies";

/// Client for querying the REST Countries API.
#[derive(Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: String,
    fields_filter: bool,
}

impl Default for RestCountriesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RestCountriesClient {
    /// Create a new client against the public API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a new client with a custom base URL (for testing or mirrors).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            fields_filter: true,
        }
    }

    /// Create a client from runtime configuration.
    ///
    /// Applies the configured timeout and sends a `country-stats/<version>` user agent.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("country-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            fields_filter: config.fields_filter,
        })
    }

    /// Enable or disable the `fields` query parameter.
    pub fn with_fields_filter(mut self, enabled: bool) -> Self {
        self.fields_filter = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every country.
    ///
    /// Any non-success status, transport error or malformed body yields an error
    /// whose user message is "Failed to fetch countries".
    pub async fn fetch_all(&self) -> Result<CountryList, FetchError> {
        let url = self.endpoint_url("all");
        self.get_countries(&url, FetchKind::All).await
    }

    /// Fetch countries whose name matches `name`.
    ///
    /// The name is trimmed first. A blank name fails with
    /// [`FetchError::EmptyInput`] without sending a request. A non-success
    /// status (the API answers 404 when nothing matches) fails with
    /// [`FetchError::NotFound`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = RestCountriesClient::new();
    /// let countries = client.fetch_by_name("united").await?;
    /// ```
    pub async fn fetch_by_name(&self, name: &str) -> Result<CountryList, FetchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FetchError::EmptyInput);
        }

        let url = self.endpoint_url(&format!("name/{}", urlencoding::encode(name)));
        self.get_countries(&url, FetchKind::ByName).await
    }

    fn endpoint_url(&self, path: &str) -> String {
        if self.fields_filter {
            format!("{}/{}?fields={}", self.base_url, path, REPORT_FIELDS)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_countries(&self, url: &str, kind: FetchKind) -> Result<CountryList, FetchError> {
        debug!(url = %url, "Requesting countries");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { kind, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Country API returned non-success status");
            return Err(non_success(kind, status));
        }

        let raw = response
            .json::<Vec<RawCountry>>()
            .await
            .map_err(|source| FetchError::Request { kind, source })?;

        debug!(count = raw.len(), "Countries received");
        Ok(raw.into_iter().map(CountryRecord::from).collect())
    }
}

fn non_success(kind: FetchKind, status: StatusCode) -> FetchError {
    match kind {
        FetchKind::All => FetchError::Status { status },
        FetchKind::ByName => FetchError::NotFound { status },
    }
}
