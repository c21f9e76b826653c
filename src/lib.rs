#![allow(dead_code)]

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

/// Builds the full application router from the current environment.
/// A missing or unreachable database degrades the app to mock mode
/// instead of failing construction.
pub async fn create_app() -> axum::Router {
    let config = Arc::new(Config::from_env());

    let database = match config.database_url.as_deref() {
        Some(url) => match db::Database::connect(url).await {
            Ok(database) => Some(Arc::new(database)),
            Err(err) => {
                tracing::warn!(error = %err, "database not initialized, serving mock data");
                None
            }
        },
        None => None,
    };

    let state = AppState::new(config, database);

    routes::router(state).layer(TraceLayer::new_for_http())
}
