//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; every subsystem logs with fields
//! - Request ID flows from the transport into the chain via `x-request-id`

pub mod logging;

pub use logging::init_logging;
