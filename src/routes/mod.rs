mod debug;
mod health;
mod records;
mod summary;
mod words;
mod wrong_answers;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;

use crate::auth::AuthUser;
use crate::middleware::auth::require_auth;
use crate::middleware::cors::cors_middleware;
use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let auth_state = state.clone();

    let mut app = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/words/stats", get(words::stats))
        .route("/api/summary/daily", post(summary::daily))
        .route(
            "/api/records",
            get(records::list_records).post(records::create_record),
        );

    app = app.nest(
        "/api/wrong-answers",
        wrong_answers::router().layer(middleware::from_fn_with_state(auth_state, require_auth)),
    );
    app = app.nest("/api", debug::router());

    app.fallback(fallback_handler)
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "接口不存在").into_response()
}

/// Shared bearer-token check for the handlers that authenticate inline.
/// Token problems map to 401 before any database concern is consulted.
pub(crate) fn bearer_user(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, Response> {
    let Some(token) = crate::auth::extract_token(headers) else {
        return Err(
            json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "未提供认证令牌")
                .into_response(),
        );
    };

    let Some(secret) = state.config().jwt_secret.as_deref() else {
        return Err(json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CONFIG_ERROR",
            "认证服务未配置",
        )
        .into_response());
    };

    crate::auth::verify_token(&token, secret).map_err(|_| {
        json_error(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "认证失败，请重新登录",
        )
        .into_response()
    })
}

pub(crate) async fn split_body(
    req: Request<Body>,
) -> Result<(axum::http::request::Parts, Bytes), Response> {
    let (parts, body) = req.into_parts();
    let body_bytes = match axum::body::to_bytes(body, 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return Err(
                json_error(StatusCode::BAD_REQUEST, "BODY_TOO_LARGE", "请求体过大").into_response(),
            )
        }
    };
    Ok((parts, body_bytes))
}

pub(crate) fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key && !v.is_empty()).then(|| v.to_string())
    })
}
