//! `tiger serve` — run the HTTP gateway.
//!
//! Startup sequence:
//! 1. Build the dispatcher from the (already loaded) config
//! 2. Bind the listener on `host:port`
//! 3. Serve until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tiger_core::config::Config;
use tiger_providers::Dispatcher;

use crate::helpers;
use crate::routes::{router, AppState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the gateway until shutdown.
pub async fn run(config: Config) -> Result<()> {
    helpers::print_banner();

    let dispatcher = Dispatcher::new(&config.providers).context("failed to build HTTP client")?;
    for profile in dispatcher.profiles() {
        if profile.is_configured() {
            info!(provider = profile.name(), model = profile.default_model(), "provider ready");
        } else {
            warn!(
                provider = profile.name(),
                env_key = profile.spec().env_key,
                "provider has no API key, requests to it will fail"
            );
        }
    }

    let app = router(AppState {
        dispatcher: Arc::new(dispatcher),
    });

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "gateway listening");
    println!("  Listening on http://{addr}");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
