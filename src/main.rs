use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;

use cihui_backend_rust::config::Config;
use cihui_backend_rust::db::{self, migrate};
use cihui_backend_rust::logging;
use cihui_backend_rust::routes;
use cihui_backend_rust::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Arc::new(Config::from_env());

    let _log_guard = logging::init_tracing(&config.log_level);

    let database = match config.database_url.as_deref() {
        Some(url) => match db::Database::connect(url).await {
            Ok(database) => {
                if let Err(err) = migrate::run_migrations(database.pool()).await {
                    tracing::error!(error = %err, "migrations failed");
                    std::process::exit(1);
                }
                Some(Arc::new(database))
            }
            Err(err) => {
                tracing::warn!(error = %err, "database not initialized, serving mock data");
                None
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set, serving mock data");
            None
        }
    };

    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET not set, authenticated endpoints will reject all requests");
    }

    let state = AppState::new(Arc::clone(&config), database);

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!(%addr, environment = %config.environment, "cihui-backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
