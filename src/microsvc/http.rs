//! HTTP transport for microsvc — maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command` — dispatch a command. Body = JSON input, request headers → Session.
//! - `GET /catalog` — `catalog.list` with `learnerId` / `includeStatus` query parameters.
//! - `POST /catalog` — `catalog.create`.
//! - `GET /health` — health check returning `{ "ok": true, "commands": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use accolade::{handlers, microsvc, InMemoryStore};
//!
//! let service = Arc::new(handlers::service(InMemoryStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = microsvc::router(service.clone());
//!
//! // Or serve directly
//! microsvc::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tracing::info;

use super::service::Service;
use super::session::Session;

/// Command served by `GET /catalog`.
pub const CATALOG_LIST: &str = "catalog.list";
/// Command served by `POST /catalog`.
pub const CATALOG_CREATE: &str = "catalog.create";

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<R: Send + Sync + 'static>(service: Arc<Service<R>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/catalog", get(catalog_list_handler).post(catalog_create_handler))
        .route("/:command", post(command_handler))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<R: Send + Sync + 'static>(
    service: Arc<Service<R>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    let mut commands: Vec<&str> = service.commands();
    commands.sort_unstable();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /:command` — dispatch a command with JSON body and headers as session.
async fn command_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> Response {
    dispatch(&service, &command, input, &headers)
}

/// `GET /catalog` — query parameters become the `catalog.list` input.
async fn catalog_list_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    dispatch(&service, CATALOG_LIST, query_to_input(params), &headers)
}

/// `POST /catalog` — create an achievement.
async fn catalog_create_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> Response {
    dispatch(&service, CATALOG_CREATE, input, &headers)
}

fn dispatch<R: Send + Sync + 'static>(
    service: &Service<R>,
    command: &str,
    input: Value,
    headers: &HeaderMap,
) -> Response {
    let session = session_from_headers(headers);
    match service.dispatch(command, input, session) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(e.body())).into_response()
        }
    }
}

/// Query strings are untyped. `true`/`false` become booleans, everything
/// else stays a string; handlers decide what `1`/`0` mean.
fn query_to_input(params: HashMap<String, String>) -> Value {
    let input: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| {
            let value = match value.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(value),
            };
            (key, value)
        })
        .collect();
    Value::Object(input)
}

/// Extract session variables from HTTP headers.
///
/// All headers are lowercased and included as session variables.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut vars = HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            vars.insert(name.as_str().to_string(), v.to_string());
        }
    }
    Session::from_map(vars)
}
