//! Country Stats - country metadata from REST Countries, summarised into tables.
//!
//! # Endpoints
//!
//! - `GET /` - The page
//! - `GET /countries` - Render all countries
//! - `GET /countries/search?name=..` - Render countries matching a name
//! - `GET /report`, `GET /report/search?name=..` - Structured JSON reports
//! - `GET /health` - Health check

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use country_stats::api::{AppState, router};
use country_stats::config::Config;
use country_stats::data_sources::RestCountriesClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("country_stats=info".parse()?))
        .init();

    // Load configuration from environment
    let config = Config::from_env();

    info!(
        port = config.port,
        api_base = %config.api_base,
        locale = %config.locale_tag,
        timeout_secs = config.timeout.as_secs(),
        "Starting Country Stats server"
    );

    // Upstream client shared by all handlers
    let source = RestCountriesClient::from_config(&config)?;
    let state = AppState {
        source,
        locale: config.locale(),
    };

    // Build router
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Country Stats is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
