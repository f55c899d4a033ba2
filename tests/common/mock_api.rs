//! Local stand-in for the REST Countries API, served by axum on a random port.
//!
//! Routes mirror upstream, including its quirks: `/all` without `fields` is a
//! 400, and a name with no match is a 404 with a JSON error body.

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;

pub const FIXTURE: &str = include_str!("../fixtures/countries.json");

pub fn fixtures() -> Vec<Value> {
    serde_json::from_str(FIXTURE).expect("fixture json")
}

fn text(v: &Value, a: &str, b: &str) -> String {
    v[a][b].as_str().unwrap_or_default().to_lowercase()
}

async fn all(Query(q): Query<HashMap<String, String>>) -> Response {
    if !q.contains_key("fields") {
        let body = json!({"message": "'fields' query not specified", "status": 400});
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    Json(fixtures()).into_response()
}

async fn by_name(
    Path(name): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let full = q.get("fullText").is_some_and(|v| v == "true");
    let needle = name.to_lowercase();
    let hits: Vec<Value> = fixtures()
        .into_iter()
        .filter(|c| {
            let common = text(c, "name", "common");
            let official = text(c, "name", "official");
            if full {
                common == needle || official == needle
            } else {
                common.contains(&needle) || official.contains(&needle)
            }
        })
        .collect();
    if hits.is_empty() {
        let body = json!({"status": 404, "message": "Not Found"});
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(hits).into_response()
}

async fn by_codes(Query(q): Query<HashMap<String, String>>) -> Response {
    let Some(codes) = q.get("codes") else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let wanted: Vec<String> = codes.split(',').map(|c| c.trim().to_uppercase()).collect();
    let hits: Vec<Value> = fixtures()
        .into_iter()
        .filter(|c| {
            c["cca3"]
                .as_str()
                .is_some_and(|code| wanted.iter().any(|w| w == code))
        })
        .collect();
    Json(hits).into_response()
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn garbage() -> &'static str {
    "<html>maintenance</html>"
}

pub fn app() -> Router {
    Router::new()
        .route("/v3.1/all", get(all))
        .route("/v3.1/name/{name}", get(by_name))
        .route("/v3.1/alpha", get(by_codes))
        .route("/broken/v3.1/all", get(broken))
        .route("/broken/v3.1/alpha", get(broken))
        .route("/broken/v3.1/name/{name}", get(broken))
        .route("/garbage/v3.1/all", get(garbage))
}

/// Start the mock on a random port; returns `http://127.0.0.1:PORT`.
pub fn start() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app()).await
        })
    });

    format!("http://{}", addr)
}
