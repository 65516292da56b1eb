//! fpbridge-api - HTTP API layer for the fingerprint bridge
//!
//! This crate provides the two bridge endpoints on top of any `DeviceLink`
//! implementation. It is transport-agnostic: the daemon hands it a real
//! serial channel, tests hand it a scripted mock.
//!
//! # Usage
//!
//! ```ignore
//! use fpbridge_api::{create_router, AppState};
//! use fpbridge_serial::SerialChannel;
//!
//! let channel = SerialChannel::open(path, baud, pacing, read_timeout)?;
//! let state = AppState::new(Arc::new(channel));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the bridge REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Enrollment and verification
        .route("/enroll", post(handlers::enroll::enroll))
        .route("/verify", get(handlers::verify::verify))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
