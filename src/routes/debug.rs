use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::services::record::now_iso;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test_endpoint))
        .route("/simple-test", get(simple_test))
        .route("/debug-env", get(debug_env))
}

#[derive(Serialize)]
struct TestResponse {
    success: bool,
    message: &'static str,
    timestamp: String,
    method: String,
    url: String,
}

async fn test_endpoint(req: Request<Body>) -> Response {
    Json(TestResponse {
        success: true,
        message: "API is working",
        timestamp: now_iso(),
        method: req.method().to_string(),
        url: req.uri().to_string(),
    })
    .into_response()
}

#[derive(Serialize)]
struct SimpleTestResponse {
    ok: bool,
    timestamp: String,
}

async fn simple_test() -> Response {
    Json(SimpleTestResponse {
        ok: true,
        timestamp: now_iso(),
    })
    .into_response()
}

/// Reports which runtime pieces are configured. Only booleans leave the
/// process; secret values never appear in a response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugEnvResponse {
    success: bool,
    environment: String,
    uptime_seconds: u64,
    has_database_url: bool,
    has_jwt_secret: bool,
    database_connected: bool,
}

async fn debug_env(State(state): State<AppState>) -> Response {
    let config = state.config();
    Json(DebugEnvResponse {
        success: true,
        environment: config.environment.clone(),
        uptime_seconds: state.uptime_seconds(),
        has_database_url: config.database_url.is_some(),
        has_jwt_secret: config.jwt_secret.is_some(),
        database_connected: state.db().is_some(),
    })
    .into_response()
}
