//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router whose fallback runs the middleware chain
//! - Wire up tower-http layers (tracing, request ID, timeout)
//! - Buffer the request body so synchronous handlers can read it
//! - Run the chain off the async runtime and render its outcome
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::Ergo;
use crate::config::ServerConfig;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::response::ResponseWriter;

/// State injected into the chain handler.
struct AppState<S> {
    ergo: Arc<Ergo<S>>,
    max_body_bytes: usize,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            ergo: self.ergo.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// HTTP server running one middleware chain.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `ergo` for every request.
    pub fn new<S>(config: ServerConfig, ergo: Arc<Ergo<S>>) -> Self
    where
        S: Send + Sync + 'static,
    {
        let router = build_router(&config, ergo);
        Self { router, config }
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            max_body_bytes = self.config.limits.max_body_bytes,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The configured router, for driving the server without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router<S>(config: &ServerConfig, ergo: Arc<Ergo<S>>) -> Router
where
    S: Send + Sync + 'static,
{
    let state = AppState {
        ergo,
        max_body_bytes: config.limits.max_body_bytes,
    };

    Router::new()
        .fallback(chain_handler::<S>)
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

/// Runs the chain for every request.
async fn chain_handler<S>(State(state): State<AppState<S>>, request: Request<Body>) -> Response
where
    S: Send + Sync + 'static,
{
    let (parts, body) = request.into_parts();
    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                limit = state.max_body_bytes,
                error = %e,
                "Request body rejected"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };
    let request = Request::from_parts(parts, body);

    // Handlers are synchronous; keep them off the async workers.
    let ergo = state.ergo.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut w = ResponseWriter::new();
        let result = ergo.serve(&request, &mut w);
        (w, result)
    })
    .await;

    match outcome {
        Ok((w, Ok(()))) => w.into_response(),
        Ok((w, Err(e))) => {
            tracing::warn!(
                request_id = %request_id,
                status = %e.status_code(),
                error = %e,
                "Error escaped the middleware chain"
            );
            w.into_error_response(e)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Middleware chain panicked");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
