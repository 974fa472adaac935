//! HTTP API handlers for Country Stats.
//!
//! # Endpoints
//!
//! - **GET /**: the page
//! - **GET /countries**: "show all" trigger, returns rendered panels
//! - **GET /countries/search?name=..**: "search" trigger, returns rendered panels
//! - **GET /report**, **GET /report/search?name=..**: the same data as structured JSON
//! - **GET /health**: health check
//!
//! Every request fetches fresh data. On failure the panels come back cleared
//! together with the single user-facing message, so the page never shows stale
//! tables next to an error.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::{DateTime, Utc};
use num_format::Locale;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::aggregation::build_report;
use crate::data_sources::RestCountriesClient;
use crate::error::FetchError;
use crate::model::{CountryList, ReportResponse, SearchQuery};
use crate::page::index_html;
use crate::report::{PanelSet, render_countries};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: RestCountriesClient,
    pub locale: &'static Locale,
}

/// Response of the trigger endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelsResponse {
    /// Sequence token from the request, if one was sent.
    pub seq: Option<u64>,

    pub generated_at: DateTime<Utc>,

    /// Number of countries rendered.
    pub count: usize,

    /// HTML fragment per panel. All empty on error.
    pub panels: PanelSet,

    /// User-facing error message.
    pub error: Option<String>,
}

/// Error body of the JSON report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/countries", get(get_all_countries))
        .route("/countries/search", get(search_countries))
        .route("/report", get(get_report))
        .route("/report/search", get(search_report))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - The page.
pub async fn index() -> Html<String> {
    Html(index_html())
}

/// GET /countries - Render every country.
///
/// # Query Parameters
///
/// - `seq` (optional): Request sequence token, echoed back
#[instrument(skip(state))]
pub async fn get_all_countries(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> (StatusCode, Json<PanelsResponse>) {
    // `seq` is echoed back unchanged
    let result = state.source.fetch_all().await;
    render_result(&state, result, query.seq)
}

/// GET /countries/search - Render countries matching `name`.
///
/// # Query Parameters
///
/// - `name` (required): Free-text country name; blank answers 400
/// - `seq` (optional): Request sequence token, echoed back
///
/// # Response
///
/// ```json
/// {
///     "seq": 3,
///     "generated_at": "2024-01-15T10:30:00Z",
///     "count": 1,
///     "panels": {"results": "<tr>...</tr>", "stats": "Total Countries: 1<br>..."},
///     "error": null
/// }
/// ```
#[instrument(skip(state))]
pub async fn search_countries(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> (StatusCode, Json<PanelsResponse>) {
    // A missing `name` is treated like a blank one: 400, no upstream call
    let name = query.name.as_deref().unwrap_or_default();
    let result = state.source.fetch_by_name(name).await;
    render_result(&state, result, query.seq)
}

/// GET /report - Structured report for every country.
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, (StatusCode, Json<ErrorResponse>)> {
    let result = state.source.fetch_all().await;
    report_result(&state, result)
}

/// GET /report/search - Structured report for countries matching `name`.
#[instrument(skip(state))]
pub async fn search_report(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ReportResponse>, (StatusCode, Json<ErrorResponse>)> {
    let name = query.name.as_deref().unwrap_or_default();
    let result = state.source.fetch_by_name(name).await;
    report_result(&state, result)
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

fn render_result(
    state: &AppState,
    result: Result<CountryList, FetchError>,
    seq: Option<u64>,
) -> (StatusCode, Json<PanelsResponse>) {
    match result {
        Ok(countries) => {
            // Every panel is rewritten from this fetch alone
            let mut panels = PanelSet::new();
            render_countries(&countries, state.locale, &mut panels);
            info!(count = countries.len(), seq = ?seq, "Countries rendered");
            (
                StatusCode::OK,
                Json(PanelsResponse {
                    seq,
                    generated_at: Utc::now(),
                    count: countries.len(),
                    panels,
                    error: None,
                }),
            )
        }
        Err(e) => {
            // Failed fetch: every panel comes back empty
            warn!(error = %e, seq = ?seq, "Country fetch failed");
            (
                e.status_code(),
                Json(PanelsResponse {
                    seq,
                    generated_at: Utc::now(),
                    count: 0,
                    panels: PanelSet::cleared(),
                    error: Some(e.user_message().to_string()),
                }),
            )
        }
    }
}

fn report_result(
    state: &AppState,
    result: Result<CountryList, FetchError>,
) -> Result<Json<ReportResponse>, (StatusCode, Json<ErrorResponse>)> {
    match result {
        Ok(countries) => {
            let report = build_report(&countries, state.locale);
            info!(
                count = countries.len(),
                regions = report.regions.len(),
                languages = report.languages.len(),
                currencies = report.currencies.len(),
                "Report built"
            );
            Ok(Json(ReportResponse {
                generated_at: Utc::now(),
                report,
            }))
        }
        Err(e) => {
            warn!(error = %e, "Country fetch failed");
            Err((
                e.status_code(),
                Json(ErrorResponse {
                    error: e.user_message().to_string(),
                }),
            ))
        }
    }
}
