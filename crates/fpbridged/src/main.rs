//! fpbridged - Fingerprint Bridge Daemon
//!
//! HTTP front end for a serial fingerprint enrollment device:
//!
//!   POST /enroll  {"student_id": "42"}  → forwards `enroll:42` to the device
//!   GET  /verify                        → forwards `verify` to the device
//!
//! The serial device is opened once at startup; if it is absent the process
//! exits instead of starting without it. Connection parameters are fixed,
//! matching the deployed hardware.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use fpbridge_api::{create_router, AppState};
use fpbridge_serial::SerialChannel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serial device the fingerprint unit is attached to
const DEVICE_PATH: &str = "/dev/ttyUSB0";
/// Baud rate of the fingerprint unit's firmware
const BAUD_RATE: u32 = 9600;
/// Delay between writing a command and polling for the reply; the firmware
/// has no acknowledgement, it just needs this long to process
const PACING_DELAY: Duration = Duration::from_secs(1);
/// How long to wait for the single reply line before giving up
const READ_TIMEOUT: Duration = Duration::from_secs(2);
/// HTTP listen port
const HTTP_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fpbridged=info,fpbridge_api=info,fpbridge_serial=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fpbridged (fingerprint bridge daemon)");

    // Open the serial channel once for the process lifetime. No retry: a
    // missing or busy device is fatal.
    let channel = SerialChannel::open(DEVICE_PATH, BAUD_RATE, PACING_DELAY, READ_TIMEOUT)?;
    let state = AppState::new(Arc::new(channel));

    // Create the router
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], HTTP_PORT));
    tracing::info!("Listening on http://{}", addr);

    // Run the server until a shutdown signal arrives; the serial handle is
    // released when the server future resolves and state drops
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
