mod proxy;
mod routes;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use parley_core::config::normalize_base_url;
use parley_core::constants::DEFAULT_BASE_URL;
use parley_core::tracing_setup::init_stderr_tracing;
use tokio::net::TcpListener;

use crate::proxy::{router, ProxyState};
use crate::routes::{DEFAULT_LISTEN_PORT, FORWARDED_PREFIXES, TUNNEL_PREFIX};

/// Local development proxy: forwards API and WebSocket traffic to the backend
#[derive(Parser, Debug)]
#[command(name = "parley-devproxy", version, about)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_LISTEN_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Backend base URL
    #[arg(long, env = "PARLEY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    backend: String,

    /// Log every forwarded request
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_stderr_tracing("parley-devproxy", args.verbose)?;

    let backend = normalize_base_url(&args.backend)?;
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;

    let state = ProxyState::new(&backend).context("Failed to build upstream client")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        listen = %addr,
        backend = state.backend(),
        forwarded = ?FORWARDED_PREFIXES,
        tunnel = TUNNEL_PREFIX,
        "dev proxy ready"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("Proxy server failed")?;

    Ok(())
}
