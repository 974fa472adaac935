//! Local stand-in for the REST Countries API.
//!
//! Routes:
//! - `/v3.1/all` and `/v3.1/name/:name` serve a small fixture
//! - `/broken/all` answers 500
//! - `/garbage/all` and `/garbage/name/:name` answer 200 with a body that is not JSON

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub struct StubApi {
    addr: std::net::SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl StubApi {
    /// Base URL serving the fixture.
    pub fn base_url(&self) -> String {
        format!("http://{}/v3.1", self.addr)
    }

    /// Base URL whose `/all` answers 500.
    pub fn broken_url(&self) -> String {
        format!("http://{}/broken", self.addr)
    }

    /// Base URL whose `/all` and `/name/{name}` answer with invalid JSON.
    pub fn garbage_url(&self) -> String {
        format!("http://{}/garbage", self.addr)
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_stub() -> StubApi {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/v3.1/all", get(all))
        .route("/v3.1/name/:name", get(by_name))
        .route("/broken/all", get(broken))
        .route("/garbage/all", get(garbage))
        .route("/garbage/name/:name", get(garbage))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubApi { addr, hits }
}

pub fn fixture() -> Value {
    json!([
        {
            "name": {"common": "Germany", "official": "Federal Republic of Germany"},
            "population": 83240525,
            "region": "Europe",
            "languages": {"deu": "German"},
            "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}
        },
        {
            "name": {"common": "Japan", "official": "Japan"},
            "population": 125836021,
            "region": "Asia",
            "languages": {"jpn": "Japanese"},
            "currencies": {"JPY": {"name": "Japanese yen", "symbol": "¥"}}
        },
        {
            "name": {"common": "Belgium", "official": "Kingdom of Belgium"},
            "population": 11555997,
            "region": "Europe",
            "languages": {"deu": "German", "fra": "French", "nld": "Dutch"},
            "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}
        },
        {
            "name": {"common": "Bouvet Island", "official": "Bouvet Island"},
            "currencies": {}
        }
    ])
}

async fn all(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(fixture())
}

async fn by_name(State(hits): State<Arc<AtomicUsize>>, Path(name): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let needle = name.to_lowercase();
    let matches: Vec<Value> = fixture()
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| {
            c["name"]["common"]
                .as_str()
                .unwrap()
                .to_lowercase()
                .contains(&needle)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"status": 404, "message": "Not Found"})),
        )
            .into_response()
    } else {
        Json(Value::Array(matches)).into_response()
    }
}

async fn broken(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn garbage(State(hits): State<Arc<AtomicUsize>>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    "<html>not json</html>"
}
