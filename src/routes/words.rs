use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::response::json_error;
use crate::services::stats::{self, WordStats};
use crate::state::AppState;

const MOCK_MESSAGE: &str = "Mock data - database not connected yet";

#[derive(Serialize)]
struct WordsStatsResponse {
    success: bool,
    stats: WordStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Without a configured database this endpoint serves the fixed mock
/// payload to anyone. With a database it computes per-user stats and
/// therefore requires a bearer token.
pub async fn stats(State(state): State<AppState>, req: Request<Body>) -> Response {
    let Some(db) = state.db() else {
        return Json(WordsStatsResponse {
            success: true,
            stats: WordStats::default(),
            message: Some(MOCK_MESSAGE.to_string()),
        })
        .into_response();
    };

    let user = match super::bearer_user(&state, req.headers()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match stats::word_stats(&db, &user.id).await {
        Ok(stats) => Json(WordsStatsResponse {
            success: true,
            stats,
            message: None,
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "word stats query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "服务器内部错误",
            )
            .into_response()
        }
    }
}
