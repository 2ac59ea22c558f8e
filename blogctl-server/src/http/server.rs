//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::error::AppError;
use super::routes;
use crate::auth::SessionGate;
use crate::config::BlogConfig;
use crate::render::{JsonRenderer, Renderer, View};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Immutable blog configuration
    pub config: Arc<BlogConfig>,
    pub sessions: SessionGate,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// State with the JSON renderer.
    pub fn new(pool: SqlitePool, config: BlogConfig) -> Self {
        Self::with_renderer(pool, config, Arc::new(JsonRenderer))
    }

    pub fn with_renderer(pool: SqlitePool, config: BlogConfig, renderer: Arc<dyn Renderer>) -> Self {
        let sessions = SessionGate::new(config.admin.clone());
        Self {
            pool,
            config: Arc::new(config),
            sessions,
            renderer,
        }
    }

    /// Render `view` with the site params into a 200 response.
    pub fn render(&self, view: &View) -> Result<Response, AppError> {
        let body = self.renderer.render(&self.config.site, view)?;
        Ok(([(CONTENT_TYPE, self.renderer.content_type())], body).into_response())
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::blog::router())
        .merge(routes::dashboard::router())
        .merge(routes::posts::router())
        .merge(routes::contact::router())
        .merge(routes::uploader::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server on `config.server.bind`.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&config.database.url).await?;
/// run_server(pool, config).await?;
/// ```
pub async fn run_server(pool: SqlitePool, config: BlogConfig) -> Result<(), ServerError> {
    let bind_addr = config.server.bind;
    tracing::info!(uploads = %config.uploads.dir.display(), "upload directory");
    let state = Arc::new(AppState::new(pool, config));
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

