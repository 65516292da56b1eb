//! Loopback test over a pseudo-terminal pair, exercising the real port type
//! end to end instead of an in-memory pipe.

#![cfg(unix)]

use std::time::Duration;

use fpbridge_core::{Command, DeviceLink};
use fpbridge_serial::LineChannel;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_serial::SerialStream;

#[tokio::test]
async fn test_exchange_over_pty_pair() {
    let (bridge_port, device_port) = SerialStream::pair().expect("failed to open pty pair");
    let chan = LineChannel::new(bridge_port, Duration::from_millis(20), Duration::from_secs(2));

    let device = tokio::spawn(async move {
        let mut reader = BufReader::new(device_port);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert_eq!(line.trim_end(), "enroll:42");
        reader
            .get_mut()
            .write_all(b"OK:ENROLLED:42\n")
            .await
            .unwrap();
    });

    let reply = chan
        .send_command(&Command::Enroll("42".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "OK:ENROLLED:42");
    device.await.unwrap();
}
