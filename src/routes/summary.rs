use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::response::json_error;
use crate::services::summary::{generate_daily_summary, DailySummary, LearningData};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailySummaryRequest {
    learning_data: LearningData,
}

#[derive(Serialize)]
struct DailySummaryResponse {
    success: bool,
    summary: DailySummary,
}

pub async fn daily(req: Request<Body>) -> Response {
    let (_, body_bytes) = match super::split_body(req).await {
        Ok(value) => value,
        Err(response) => return response,
    };

    let payload: DailySummaryRequest = match serde_json::from_slice(&body_bytes) {
        Ok(value) => value,
        Err(_) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "缺少 learningData 字段",
            )
            .into_response()
        }
    };

    Json(DailySummaryResponse {
        success: true,
        summary: generate_daily_summary(&payload.learning_data),
    })
    .into_response()
}
