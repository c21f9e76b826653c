use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::record::now_iso;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    service: &'static str,
    method: String,
    url: String,
}

pub async fn health(req: Request<Body>) -> Response {
    let response = HealthResponse {
        status: "ok",
        timestamp: now_iso(),
        service: "cihui-backend",
        method: req.method().to_string(),
        url: req.uri().to_string(),
    };

    Json(response).into_response()
}
