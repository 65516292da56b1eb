//! Application state for the bridge API

use std::sync::Arc;

use fpbridge_core::DeviceLink;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// The single process-lifetime link to the fingerprint device
    link: Arc<dyn DeviceLink>,
}

impl AppState {
    /// Create a new AppState around the device link
    pub fn new(link: Arc<dyn DeviceLink>) -> Self {
        Self { link }
    }

    /// Get the device link
    pub fn link(&self) -> &Arc<dyn DeviceLink> {
        &self.link
    }
}
