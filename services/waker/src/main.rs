//! coldfront waker.
//!
//! The waker fronts a compute service that scales to zero replicas when
//! idle. An external edge router invokes it only when the primary path is
//! unavailable; each invocation scales the service back up to one replica,
//! polls the scheduler until a task is observably running, forwards the
//! original request to the service's stable DNS name, and relays the
//! response in a text-safe envelope.
//!
//! Scale-down is not handled here; an external idle-detection loop
//! drives the desired count back to zero.

use anyhow::Result;
use coldfront_scheduler::{HttpScheduler, ServiceDescriptor};
use coldfront_wake::WakeDriver;
use coldfront_waker::{api, config, state::AppState};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to COLDFRONT_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting coldfront waker");
    info!(
        listen_addr = %config.listen_addr,
        scheduler_url = %config.scheduler_url,
        cluster_id = %config.cluster_id,
        service_id = %config.service_id,
        origin_url = %config.origin_url,
        "Configuration loaded"
    );

    // One connection pool shared by the scheduler client and the forwarder.
    let http = reqwest::Client::new();
    let scheduler = HttpScheduler::with_client(http.clone(), &config.scheduler_url);
    let service = ServiceDescriptor::new(&config.cluster_id, &config.service_id);
    let driver = WakeDriver::new(scheduler, service, &config.origin_url, config.wake_policy())
        .with_http_client(http);

    let state = AppState::new(driver);
    let app = api::create_router(state);

    // Create shutdown channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    let mut server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let mut shutdown_rx = shutdown_rx;
                loop {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
    });

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        result = &mut server_handle => {
            match result {
                Ok(Ok(())) => info!("Server exited normally"),
                Ok(Err(e)) => error!(error = %e, "Server error"),
                Err(e) => error!(error = %e, "Server task panicked"),
            }
            return Ok(());
        }
    }

    // Signal shutdown and wait for in-flight invocations to drain
    let _ = shutdown_tx.send(true);

    let shutdown_timeout = std::time::Duration::from_secs(10);
    if let Err(e) = tokio::time::timeout(shutdown_timeout, server_handle).await {
        warn!(error = %e, "Server did not shut down in time");
    }

    info!("Waker shutdown complete");
    Ok(())
}
