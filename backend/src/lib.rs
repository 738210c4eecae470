pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod store;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use slots_shared::constants::{LOGIN_ENDPOINT, PURCHASE_ENDPOINT, REGISTER_ENDPOINT, WIN_ENDPOINT};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::store::WalletStore;

#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<WalletStore>>,
}

pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(REGISTER_ENDPOINT, post(handlers::register))
        .route(LOGIN_ENDPOINT, post(handlers::login))
        .route(WIN_ENDPOINT, post(handlers::win))
        .route(PURCHASE_ENDPOINT, post(handlers::purchase))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `app` until `shutdown` resolves, then drains open connections.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down wallet...");
}
