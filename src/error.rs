//! Error types for fetching country data.
//!
//! Every failure maps to exactly one user-facing message. The HTTP layer
//! decides how to surface it; nothing in this crate pops dialogs or retries.

use axum::http::StatusCode;
use thiserror::Error;

/// Message shown when the full country list cannot be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch countries";

/// Message shown when a name search yields nothing.
pub const NOT_FOUND_MESSAGE: &str = "No countries found";

/// Message shown when the search box was submitted blank.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a country name";

/// Which data source operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// `GET {base}/all`
    All,
    /// `GET {base}/name/{name}`
    ByName,
}

/// Failure of a [`RestCountriesClient`](crate::data_sources::RestCountriesClient) call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The user submitted a blank search term. No request was sent.
    #[error("search term is empty")]
    EmptyInput,

    /// The name search returned a non-success status (usually 404).
    #[error("no countries matched (upstream status {status})")]
    NotFound { status: StatusCode },

    /// The full list request returned a non-success status.
    #[error("country list request failed with status {status}")]
    Status { status: StatusCode },

    /// Transport or body decoding failure.
    #[error("request to country API failed: {source}")]
    Request {
        kind: FetchKind,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The single message surfaced to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::EmptyInput => EMPTY_INPUT_MESSAGE,
            FetchError::NotFound { .. } => NOT_FOUND_MESSAGE,
            FetchError::Status { .. } => FETCH_FAILED_MESSAGE,
            FetchError::Request { kind, .. } => match kind {
                FetchKind::All => FETCH_FAILED_MESSAGE,
                FetchKind::ByName => NOT_FOUND_MESSAGE,
            },
        }
    }

    /// HTTP status the API answers with when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::EmptyInput => StatusCode::BAD_REQUEST,
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::Status { .. } | FetchError::Request { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}
