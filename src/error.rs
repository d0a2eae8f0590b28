//! Error taxonomy for chain dispatch.
//!
//! Reaching the end of the chain is not represented here: exhaustion is the
//! normal way a request finishes and is reported as `None` by
//! [`Chain::resolve`](crate::chain::Chain::resolve).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Boxed error type handlers can wrap their own failures in.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used by handlers and the dispatcher.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a request's trip through the chain.
#[derive(Debug, Error)]
pub enum Error {
    /// The per-request context is not bound to a chain, so there is nothing to
    /// dispatch to. Indicates a context built outside [`Ergo::serve`](crate::Ergo::serve).
    #[error("no middleware context: request state is not bound to a chain")]
    NoDispatchContext,

    /// Application error carrying the HTTP status it should be rendered with.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Arbitrary handler failure.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    /// Writing to the response sink failed.
    #[error("response write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Application error with an explicit status code.
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Error::Status {
            status,
            message: message.into(),
        }
    }

    /// 401 shorthand, the usual outcome of an auth check.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::status(StatusCode::UNAUTHORIZED, message)
    }

    /// Wrap any error returned by handler code.
    pub fn handler<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Handler(err.into())
    }

    /// HTTP status used when this error reaches the transport unhandled.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Status { status, .. } => *status,
            Error::NoDispatchContext | Error::Handler(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal details stay in the logs.
        let body = match self {
            Error::Status { message, .. } => message,
            _ => status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };
        (status, body).into_response()
    }
}
