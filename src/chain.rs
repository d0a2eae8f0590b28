//! Ordered handler chain.
//!
//! # Design Decisions
//! - Flat list: nesting comes from handlers calling `next`, not from structure
//! - Positions are 1-indexed, position 0 never resolves
//! - Resolution clones the `Arc`, so the lock is released before the handler runs
//! - Registration takes the write lock; resolution takes the read lock

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::context::Context;
use crate::error::Result;
use crate::response::ResponseWriter;

/// A registered handler: a plain function value.
pub type Handler<S> =
    Arc<dyn Fn(&mut Context<'_, S>, &mut ResponseWriter) -> Result<()> + Send + Sync>;

/// Handlers in registration order, shared by every request of one server.
pub struct Chain<S = ()> {
    handlers: RwLock<Vec<Handler<S>>>,
}

impl<S> Chain<S> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Append a handler to the end of the chain.
    pub fn add<F>(&self, handler: F)
    where
        F: Fn(&mut Context<'_, S>, &mut ResponseWriter) -> Result<()> + Send + Sync + 'static,
    {
        self.add_handler(Arc::new(handler));
    }

    /// Append an already type-erased handler.
    pub fn add_handler(&self, handler: Handler<S>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.push(handler);
        tracing::trace!(position = handlers.len(), "Handler registered");
    }

    /// Handler at the 1-indexed `position`, or `None` once the chain is exhausted.
    pub fn resolve(&self, position: usize) -> Option<Handler<S>> {
        let index = position.checked_sub(1)?;
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Default for Chain<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Chain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.len()).finish()
    }
}
