//! Per-request state.
//!
//! # Responsibilities
//! - Carry the request, the chain handle and the shared state to every handler
//! - Own the step counter for exactly one request
//! - Record whether the chain was halted (short-circuit or error)
//!
//! # Design Decisions
//! - Built fresh for every request, never stored on shared structures
//! - Typed fields instead of a keyed value bag
//! - Counter is only advanced by the dispatcher

use axum::body::Bytes;
use axum::http::Request;

use crate::chain::Chain;
use crate::dispatch;
use crate::error::Result;
use crate::http::X_REQUEST_ID;
use crate::response::ResponseWriter;

/// Request handed to handlers: head plus the fully buffered body.
pub type HttpRequest = Request<Bytes>;

/// State for one in-flight request.
pub struct Context<'a, S = ()> {
    pub(crate) chain: Option<&'a Chain<S>>,
    state: &'a S,
    request: &'a HttpRequest,
    pub(crate) step: usize,
    pub(crate) halted: bool,
}

impl<'a, S> Context<'a, S> {
    /// Fresh state bound to `chain`, counter at 0.
    pub fn new(chain: &'a Chain<S>, state: &'a S, request: &'a HttpRequest) -> Self {
        Self {
            chain: Some(chain),
            state,
            request,
            step: 0,
            halted: false,
        }
    }

    /// State with no chain attached. Dispatching from it fails with
    /// [`Error::NoDispatchContext`](crate::Error::NoDispatchContext); useful for
    /// calling a single handler in isolation.
    pub fn detached(request: &'a HttpRequest, state: &'a S) -> Self {
        Self {
            chain: None,
            state,
            request,
            step: 0,
            halted: false,
        }
    }

    /// The request being served.
    pub fn request(&self) -> &'a HttpRequest {
        self.request
    }

    /// Application state shared by all requests of the server.
    pub fn state(&self) -> &'a S {
        self.state
    }

    /// Value of `x-request-id`, when the transport assigned one.
    pub fn request_id(&self) -> Option<&'a str> {
        self.request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }

    /// Position of the handler most recently resolved (0 before dispatch starts).
    pub fn step(&self) -> usize {
        self.step
    }

    /// Stop the chain for this request. Handlers after the current one do not
    /// run and further `next` calls return `Ok(())` immediately.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Run the rest of the chain. See [`dispatch::next`].
    pub fn next(&mut self, w: &mut ResponseWriter) -> Result<()> {
        dispatch::next(self, w)
    }
}
