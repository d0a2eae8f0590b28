//! The "next" stepping protocol.
//!
//! Every call advances the request's counter by one and runs the handler at
//! the new position. When a handler returns `Ok` the dispatcher keeps going
//! (auto-advance), so handlers that never call `next` still let the rest of
//! the chain run. A handler that wraps the remainder of the chain calls `next`
//! itself; the counter is monotonic and per request, so whichever path
//! advances it, each handler runs at most once.
//!
//! ```text
//! serve ─▶ next ─▶ step 1: A ─▶ next ─▶ step 2: B ─▶ step 3: exhausted
//!                   │ (A returns)
//!                   └─▶ step 4: exhausted
//! ```

use crate::context::Context;
use crate::error::{Error, Result};
use crate::response::ResponseWriter;

/// Run the remainder of the chain for this request.
///
/// Returns `Ok(())` when the chain is exhausted or halted. A handler error
/// halts the chain and is returned as is; an enclosing handler may recover
/// from it, but no handler after the failing one runs for this request.
pub fn next<S>(ctx: &mut Context<'_, S>, w: &mut ResponseWriter) -> Result<()> {
    let chain = ctx.chain.ok_or(Error::NoDispatchContext)?;

    loop {
        if ctx.halted {
            return Ok(());
        }

        ctx.step = ctx.step.saturating_add(1);
        let Some(handler) = chain.resolve(ctx.step) else {
            tracing::trace!(step = ctx.step, "Chain exhausted");
            return Ok(());
        };

        tracing::trace!(step = ctx.step, "Dispatching handler");
        if let Err(err) = handler(&mut *ctx, &mut *w) {
            ctx.halted = true;
            return Err(err);
        }
    }
}
