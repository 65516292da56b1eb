//! fpbridge-core - Core traits and types for the fingerprint bridge
//!
//! This crate provides the abstractions shared by the serial transport and
//! the HTTP API layer: the command wire model, the `DeviceLink` trait that
//! the API is written against, and the common error type.

pub mod command;
pub mod error;
pub mod link;

pub use command::Command;
pub use error::{BridgeError, BridgeResult};
pub use link::DeviceLink;
