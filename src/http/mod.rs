//! HTTP transport adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum + tower-http layers: trace, request ID, timeout)
//!     → chain_handler (buffer body, build HttpRequest)
//!     → Ergo::serve on the blocking pool
//!     → ResponseWriter → Response
//! ```
//!
//! No routing happens here: every method and path reaches the same chain.

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, HttpServer};
