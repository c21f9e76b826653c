use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::response::json_error;
use crate::services::record::PaginationOptions;
use crate::services::wrong_answer::{self, CreateWrongAnswerInput};
use crate::state::AppState;

use super::records::record_error_response;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

/// Routes nested under `/api/wrong-answers`. Authentication is applied by
/// the caller as a layer, so every handler can rely on `AuthUser` being
/// present in the request extensions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wrong_answers).post(create_wrong_answer))
        .route("/:id/review", put(mark_reviewed))
}

async fn list_wrong_answers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    req: Request<Body>,
) -> Response {
    let Some(db) = state.db() else {
        return database_unavailable();
    };

    let query = req.uri().query().unwrap_or("");
    let reviewed = super::query_param(query, "reviewed").and_then(|v| v.parse::<bool>().ok());
    let options = PaginationOptions {
        page: super::query_param(query, "page").and_then(|v| v.parse::<i64>().ok()),
        page_size: super::query_param(query, "pageSize").and_then(|v| v.parse::<i64>().ok()),
    };

    match wrong_answer::list_wrong_answers(&db, &user.id, reviewed, options).await {
        Ok(result) => Json(SuccessResponse {
            success: true,
            data: result,
        })
        .into_response(),
        Err(err) => record_error_response(err, "wrong answers query failed"),
    }
}

async fn create_wrong_answer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    req: Request<Body>,
) -> Response {
    let (_, body_bytes) = match super::split_body(req).await {
        Ok(value) => value,
        Err(response) => return response,
    };

    let payload: CreateWrongAnswerInput = match serde_json::from_slice(&body_bytes) {
        Ok(value) => value,
        Err(_) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "请求参数不合法",
            )
            .into_response()
        }
    };

    let Some(db) = state.db() else {
        return database_unavailable();
    };

    match wrong_answer::create_wrong_answer(&db, &user.id, payload).await {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(SuccessResponse {
                success: true,
                data: entry,
            }),
        )
            .into_response(),
        Err(err) => record_error_response(err, "wrong answer insert failed"),
    }
}

async fn mark_reviewed(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Response {
    let Some(db) = state.db() else {
        return database_unavailable();
    };

    match wrong_answer::mark_reviewed(&db, &user.id, &id).await {
        Ok(entry) => Json(SuccessResponse {
            success: true,
            data: entry,
        })
        .into_response(),
        Err(err) => record_error_response(err, "wrong answer review update failed"),
    }
}

fn database_unavailable() -> Response {
    json_error(
        StatusCode::SERVICE_UNAVAILABLE,
        "SERVICE_UNAVAILABLE",
        "数据库服务不可用",
    )
    .into_response()
}
