//! Entry point: one chain, shared state, and the per-request bootstrap.

use std::fmt;

use crate::chain::{Chain, Handler};
use crate::context::{Context, HttpRequest};
use crate::dispatch;
use crate::error::Result;
use crate::response::ResponseWriter;

/// A middleware chain together with the state its handlers share.
pub struct Ergo<S = ()> {
    chain: Chain<S>,
    state: S,
}

impl Ergo<()> {
    /// Chain without shared state.
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Ergo<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Ergo<S> {
    /// Chain whose handlers all see `state` through [`Context::state`].
    pub fn with_state(state: S) -> Self {
        Self {
            chain: Chain::new(),
            state,
        }
    }

    /// Register a handler. Handlers run in registration order.
    pub fn add<F>(&self, handler: F)
    where
        F: Fn(&mut Context<'_, S>, &mut ResponseWriter) -> Result<()> + Send + Sync + 'static,
    {
        self.chain.add(handler);
    }

    /// Register several handlers, in iteration order.
    pub fn add_all<I>(&self, handlers: I)
    where
        I: IntoIterator<Item = Handler<S>>,
    {
        for handler in handlers {
            self.chain.add_handler(handler);
        }
    }

    /// Builder form of [`Ergo::add`].
    pub fn with<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Context<'_, S>, &mut ResponseWriter) -> Result<()> + Send + Sync + 'static,
    {
        self.add(handler);
        self
    }

    pub fn chain(&self) -> &Chain<S> {
        &self.chain
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Serve one request: fresh context at step 0, dispatch once.
    ///
    /// Errors that escape every handler are returned to the caller.
    pub fn serve(&self, request: &HttpRequest, w: &mut ResponseWriter) -> Result<()> {
        let mut ctx = Context::new(&self.chain, &self.state, request);
        let result = dispatch::next(&mut ctx, w);

        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            steps = ctx.step(),
            ok = result.is_ok(),
            "Chain finished"
        );
        result
    }
}

impl<S> fmt::Debug for Ergo<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ergo").field("chain", &self.chain).finish_non_exhaustive()
    }
}
