//! fpbridge-serial - Serial transport for the fingerprint bridge
//!
//! Provides the line-oriented command/reply exchange over a serial port.
//! The exchange logic is generic over any `AsyncRead + AsyncWrite` stream so
//! tests can run it over in-memory pipes; `SerialChannel` is the production
//! instantiation over a `tokio_serial::SerialStream`.

pub mod channel;

pub use channel::{LineChannel, SerialChannel};
