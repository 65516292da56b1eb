//! Request handlers for the bridge API

pub mod enroll;
pub mod verify;
