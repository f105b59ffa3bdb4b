//! HTTP boundary: routes, shared state, and the serve loop.

pub mod error;
pub mod handler;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::consts::{ROUTE_CONCURRENT, ROUTE_SINGLE};
use crate::engine::SortStrategy;
use crate::engine::concurrent::ConcurrentSorter;
use crate::engine::sequential::SequentialSorter;

/// Strategies and limits shared by every request.
pub struct AppState {
    pub sequential: Arc<dyn SortStrategy>,
    pub concurrent: Arc<dyn SortStrategy>,
    /// Largest accepted request body. `None` accepts any size.
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    pub fn new(sequential: Arc<dyn SortStrategy>, concurrent: Arc<dyn SortStrategy>) -> Self {
        Self {
            sequential,
            concurrent,
            max_body_bytes: None,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: Option<usize>) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// The production strategies, sized by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(SequentialSorter),
            Arc::new(ConcurrentSorter::new(config.max_workers, config.order)),
        )
        .with_body_limit(config.max_body_bytes)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = match state.max_body_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route(ROUTE_SINGLE, post(handler::process_single))
        .route(ROUTE_CONCURRENT, post(handler::process_concurrent))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("listener has no local address")?;
    info!(%addr, "sortd listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    info!("sortd stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed, waits forever.
pub async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
