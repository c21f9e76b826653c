use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::response::json_error;
use crate::services::record::{
    self, CreateLearningRecordInput, PaginationOptions, RecordError,
};
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

pub async fn list_records(State(state): State<AppState>, req: Request<Body>) -> Response {
    let user = match super::bearer_user(&state, req.headers()) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let Some(db) = state.db() else {
        return json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "数据库服务不可用",
        )
        .into_response();
    };

    let query = req.uri().query().unwrap_or("");
    let options = PaginationOptions {
        page: super::query_param(query, "page").and_then(|v| v.parse::<i64>().ok()),
        page_size: super::query_param(query, "pageSize").and_then(|v| v.parse::<i64>().ok()),
    };

    match record::list_records(&db, &user.id, options).await {
        Ok(result) => Json(SuccessResponse {
            success: true,
            data: result,
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "learning records query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "服务器内部错误",
            )
            .into_response()
        }
    }
}

pub async fn create_record(State(state): State<AppState>, req: Request<Body>) -> Response {
    let (parts, body_bytes) = match super::split_body(req).await {
        Ok(value) => value,
        Err(response) => return response,
    };

    let user = match super::bearer_user(&state, &parts.headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let payload: CreateLearningRecordInput = match serde_json::from_slice(&body_bytes) {
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
        return json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "数据库服务不可用",
        )
        .into_response();
    };

    match record::create_record(&db, &user.id, payload).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(SuccessResponse {
                success: true,
                data: record,
            }),
        )
            .into_response(),
        Err(err) => record_error_response(err, "learning record insert failed"),
    }
}

pub(crate) fn record_error_response(err: RecordError, context: &'static str) -> Response {
    match err {
        RecordError::Validation(message) => {
            json_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message).into_response()
        }
        RecordError::NotFound(message) => {
            json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message).into_response()
        }
        RecordError::Sql(sql_err) => {
            tracing::warn!(error = %sql_err, context);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "服务器内部错误",
            )
            .into_response()
        }
        RecordError::Serialization(json_err) => {
            tracing::warn!(error = %json_err, context);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "服务器内部错误",
            )
            .into_response()
        }
    }
}
