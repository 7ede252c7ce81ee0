use std::future::IntoFuture;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

mod aggregate;
mod clock;
mod config;
mod error;
mod feed;
mod metrics;
mod middleware;
mod scraper;
mod server;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::ExporterError;
use crate::feed::FeedClient;
use crate::scraper::Scraper;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Gauge store — the scrape loop writes, `/metrics` reads snapshots.
    pub registry: Arc<metrics::Registry>,
}

#[tokio::main]
async fn main() -> Result<(), ExporterError> {
    // Diagnostics on stderr; stdout carries one line per cycle.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // ── 1. Configuration ─────────────────────────────────────────
    let config = Config::parse();
    config.validate()?;

    println!(
        "Starting Reddit exporter for r/{}, updates every {}s",
        config.subreddit, config.poll_interval
    );

    // ── 2. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState {
        registry: Arc::new(metrics::Registry::new()),
    });

    let feed = FeedClient::new(
        &config.upstream,
        &config.user_agent,
        config.request_timeout(),
    )
    .map_err(ExporterError::Client)?;

    let scraper = Scraper::new(
        feed,
        SystemClock,
        state.registry.clone(),
        config.subreddit.clone(),
        config.poll_interval(),
    );

    // ── 3. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state);

    // ── 4. Bind, then start scraping ─────────────────────────────
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ExporterError::Bind {
            addr: addr.clone(),
            source,
        })?;

    println!("Metrics → http://{addr}/metrics");
    info!(%addr, upstream = %config.upstream, "listening");

    let scrape_task = tokio::spawn(scraper.run());

    // ── 5. Serve until a signal or a fatal scrape error ──────────
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    tokio::select! {
        served = server => served.map_err(ExporterError::Serve),
        fatal = scrape_task => {
            let e = fatal?;
            error!(error = %e, "registry misuse, exiting");
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("signal received, starting graceful shutdown");
}
