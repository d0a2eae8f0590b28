//! ergo demo server.
//!
//! Serves a small middleware chain over HTTP:
//!
//! ```text
//! timing (wraps) → healthz (short-circuits /healthz) → auth (optional bearer token) → hello
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::http::header;
use clap::Parser;
use tokio::net::TcpListener;

use ergo::config::{read_config, validate_config, ConfigError, ServerConfig};
use ergo::lifecycle::signals::wait_for_signal;
use ergo::observability::init_logging;
use ergo::{Context, Ergo, Error, HttpServer, ResponseWriter, Shutdown};

#[derive(Parser)]
#[command(name = "ergo")]
#[command(about = "Serve a middleware chain over HTTP", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Require `Authorization: Bearer <token>` on every request but /healthz.
    #[arg(short, long)]
    token: Option<String>,
}

/// Values every handler of the demo chain can read.
struct DemoState {
    token: Option<String>,
}

fn timing(ctx: &mut Context<'_, DemoState>, w: &mut ResponseWriter) -> ergo::Result<()> {
    let start = Instant::now();
    let request_id = ctx.request_id().unwrap_or("unknown").to_string();
    tracing::info!(request_id = %request_id, path = %ctx.request().uri().path(), "Chain started");

    let result = ctx.next(w);

    tracing::info!(
        request_id = %request_id,
        elapsed_us = start.elapsed().as_micros() as u64,
        ok = result.is_ok(),
        "Chain ended"
    );
    result
}

fn healthz(ctx: &mut Context<'_, DemoState>, w: &mut ResponseWriter) -> ergo::Result<()> {
    if ctx.request().uri().path() == "/healthz" {
        w.write_str("ok");
        ctx.halt();
    }
    Ok(())
}

fn auth(ctx: &mut Context<'_, DemoState>, _w: &mut ResponseWriter) -> ergo::Result<()> {
    let Some(expected) = ctx.state().token.as_deref() else {
        return Ok(());
    };

    let presented = ctx
        .request()
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => Ok(()),
        Some(_) => Err(Error::unauthorized("Invalid token")),
        None => Err(Error::unauthorized("Missing token")),
    }
}

fn hello(_ctx: &mut Context<'_, DemoState>, w: &mut ResponseWriter) -> ergo::Result<()> {
    w.write_str("OK");
    Ok(())
}

fn demo_chain(token: Option<String>) -> Ergo<DemoState> {
    Ergo::with_state(DemoState { token })
        .with(timing)
        .with(healthz)
        .with(auth)
        .with(hello)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth = cli.token.is_some(),
        "ergo v0.1.0 starting"
    );

    let app = Arc::new(demo_chain(cli.token));
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, app);
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await?;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
