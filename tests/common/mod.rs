//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::Request;
use ergo::{Context, HttpRequest, ResponseWriter};

/// Records which handlers ran, in order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

/// Handler that records `name` and falls through without calling `next`.
pub fn recording<S>(
    name: &'static str,
    recorder: &Recorder,
) -> impl Fn(&mut Context<'_, S>, &mut ResponseWriter) -> ergo::Result<()> + Send + Sync + 'static
where
    S: 'static,
{
    let recorder = recorder.clone();
    move |_ctx: &mut Context<'_, S>, _w: &mut ResponseWriter| {
        recorder.push(name);
        Ok(())
    }
}

/// Handler that wraps the rest of the chain with before/after events.
pub fn wrapping<S>(
    name: &'static str,
    recorder: &Recorder,
) -> impl Fn(&mut Context<'_, S>, &mut ResponseWriter) -> ergo::Result<()> + Send + Sync + 'static
where
    S: 'static,
{
    let recorder = recorder.clone();
    move |ctx: &mut Context<'_, S>, w: &mut ResponseWriter| {
        recorder.push(format!("{}:before", name));
        let result = ctx.next(w);
        recorder.push(format!("{}:after", name));
        result
    }
}

/// Bodiless request for `method` and `uri`.
pub fn request(method: &str, uri: &str) -> HttpRequest {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}
