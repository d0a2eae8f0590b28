//! Middleware chaining for HTTP request handling.
//!
//! Handlers are registered in order on an [`Ergo`] and every request is
//! threaded through them. A handler can pass control on with
//! [`Context::next`], stop the chain with [`Context::halt`], or fail with an
//! [`Error`]. Handlers that simply return `Ok(())` let the chain continue.
//!
//! ```
//! use ergo::{Context, Ergo, ResponseWriter};
//!
//! let app = Ergo::new()
//!     .with(|ctx: &mut Context<'_>, w: &mut ResponseWriter| {
//!         w.write_str("<");
//!         ctx.next(w)?;
//!         w.write_str(">");
//!         Ok(())
//!     })
//!     .with(|_ctx: &mut Context<'_>, w: &mut ResponseWriter| {
//!         w.write_str("OK");
//!         Ok(())
//!     });
//!
//! let request = ergo::HttpRequest::new(Default::default());
//! let mut w = ResponseWriter::new();
//! app.serve(&request, &mut w).unwrap();
//! assert_eq!(w.body(), b"<OK>");
//! ```

// Core
pub mod app;
pub mod chain;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod response;

// Transport and ambient subsystems
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use app::Ergo;
pub use chain::{Chain, Handler};
pub use context::{Context, HttpRequest};
pub use dispatch::next;
pub use error::{BoxError, Error, Result};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use response::ResponseWriter;
