//! Common error types for the bridge

use thiserror::Error;

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors that can occur in the bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Transport/communication error (opening the serial device, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid parameter or request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BridgeError::Transport(_) => 503,
            BridgeError::InvalidRequest(_) => 400,
            BridgeError::Internal(_) => 500,
        }
    }
}
