//! Line-oriented command/reply channel
//!
//! One exchange is: write the command line, wait a fixed pacing delay so the
//! device firmware can process it, then read back one reply line bounded by
//! the read timeout. The device offers no acknowledgement protocol; the
//! pacing delay is a hard timing assumption of its firmware.

use std::time::Duration;

use async_trait::async_trait;
use fpbridge_core::{BridgeError, BridgeResult, Command, DeviceLink};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// A command/reply channel over any line-oriented byte stream.
///
/// The stream is guarded by a mutex held across the whole write/pace/read
/// cycle, so at most one exchange is in flight on the link at a time even
/// when HTTP handlers run concurrently.
pub struct LineChannel<T> {
    io: Mutex<BufReader<T>>,
    pacing: Duration,
    read_timeout: Duration,
}

impl<T> LineChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an open stream with the given pacing delay and read timeout
    pub fn new(io: T, pacing: Duration, read_timeout: Duration) -> Self {
        Self {
            io: Mutex::new(BufReader::new(io)),
            pacing,
            read_timeout,
        }
    }

    /// Perform one exchange: send `line` (newline-terminated) and return the
    /// device's stripped reply.
    ///
    /// A write failure, read failure, or read timeout all yield `""` — the
    /// caller cannot tell them apart from a device that replied with an
    /// empty line. Failures are logged here and nowhere else.
    pub async fn exchange(&self, line: &str) -> String {
        let mut io = self.io.lock().await;

        let frame = format!("{}\n", line);
        tracing::debug!(command = %line, "sending command");
        if let Err(err) = io.write_all(frame.as_bytes()).await {
            tracing::warn!(command = %line, %err, "serial write failed");
            return String::new();
        }
        if let Err(err) = io.flush().await {
            tracing::warn!(command = %line, %err, "serial flush failed");
            return String::new();
        }

        // Give the device firmware time to process before polling for the
        // reply. There is no acknowledgement on the wire.
        tokio::time::sleep(self.pacing).await;

        let mut reply = String::new();
        match tokio::time::timeout(self.read_timeout, io.read_line(&mut reply)).await {
            Ok(Ok(_)) => {
                let reply = reply.trim().to_string();
                tracing::debug!(command = %line, reply = %reply, "received reply");
                reply
            }
            Ok(Err(err)) => {
                tracing::warn!(command = %line, %err, "serial read failed");
                String::new()
            }
            Err(_) => {
                tracing::debug!(command = %line, "read timed out, returning empty reply");
                String::new()
            }
        }
    }
}

#[async_trait]
impl<T> DeviceLink for LineChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send_command(&self, cmd: &Command) -> BridgeResult<String> {
        Ok(self.exchange(&cmd.wire()).await)
    }
}

/// The production channel over a serial port
pub type SerialChannel = LineChannel<SerialStream>;

impl SerialChannel {
    /// Open the serial device once for the process lifetime.
    ///
    /// Failure here is fatal for the daemon: there is no retry, the process
    /// must not start without its device.
    pub fn open(
        path: &str,
        baud_rate: u32,
        pacing: Duration,
        read_timeout: Duration,
    ) -> BridgeResult<Self> {
        let port = tokio_serial::new(path, baud_rate)
            .open_native_async()
            .map_err(|err| {
                BridgeError::Transport(format!("failed to open serial device {}: {}", path, err))
            })?;
        tracing::info!(path = %path, baud_rate, "serial device opened");
        Ok(Self::new(port, pacing, read_timeout))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tokio::io::{duplex, AsyncReadExt};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_enroll_exchange_bytes_and_reply() {
        let (bridge, mut device) = duplex(256);
        let chan = LineChannel::new(bridge, Duration::from_millis(10), Duration::from_secs(2));

        let device_task = tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let n = device.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"enroll:42\n");
            device.write_all(b"OK:ENROLLED\n").await.unwrap();
            device
        });

        let reply = chan
            .send_command(&Command::Enroll("42".to_string()))
            .await
            .unwrap();
        assert_eq!(reply, "OK:ENROLLED");
        device_task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_exchange_bytes() {
        let (bridge, mut device) = duplex(256);
        let chan = LineChannel::new(bridge, Duration::from_millis(10), Duration::from_secs(2));

        let device_task = tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let n = device.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"verify\n");
            device.write_all(b"7\n").await.unwrap();
        });

        let reply = chan.send_command(&Command::Verify).await.unwrap();
        assert_eq!(reply, "7");
        device_task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_delay_elapses_before_reply() {
        let (bridge, mut device) = duplex(256);
        let pacing = Duration::from_secs(1);
        let chan = LineChannel::new(bridge, pacing, Duration::from_secs(2));

        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let _ = device.read(&mut buf).await.unwrap();
            // Reply immediately; the channel must still wait out the pacing
            // delay before it reads.
            device.write_all(b"7\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let start = tokio::time::Instant::now();
        let reply = chan.exchange("verify").await;
        assert_eq!(reply, "7");
        assert!(start.elapsed() >= pacing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_whitespace_is_stripped() {
        let (bridge, mut device) = duplex(256);
        let chan = LineChannel::new(bridge, Duration::from_millis(10), Duration::from_secs(2));

        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let _ = device.read(&mut buf).await.unwrap();
            device.write_all(b"  OK:ENROLLED \r\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        assert_eq!(chan.exchange("enroll:42").await, "OK:ENROLLED");
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_device_times_out_to_empty_reply() {
        let (bridge, mut device) = duplex(256);
        let pacing = Duration::from_secs(1);
        let read_timeout = Duration::from_secs(2);
        let chan = LineChannel::new(bridge, pacing, read_timeout);

        let guard = tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let _ = device.read(&mut buf).await;
            // Never reply; keep the device end open so the read blocks
            // until the timeout fires.
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });

        let start = tokio::time::Instant::now();
        let reply = chan.exchange("verify").await;
        assert_eq!(reply, "");
        assert!(start.elapsed() >= pacing + read_timeout);
        guard.abort();
    }

    #[tokio::test]
    async fn test_closed_device_yields_empty_reply() {
        let (bridge, device) = duplex(64);
        drop(device);
        let chan = LineChannel::new(bridge, Duration::from_millis(1), Duration::from_millis(50));

        assert_eq!(chan.exchange("verify").await, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_exchanges_serialize_on_the_link() {
        let (bridge, device) = duplex(256);
        let chan = Arc::new(LineChannel::new(
            bridge,
            Duration::from_millis(10),
            Duration::from_secs(2),
        ));

        // The device reads one full line per exchange. If two exchanges
        // interleaved their writes, a line would hold fragments of both
        // commands and the match below would fail.
        tokio::spawn(async move {
            let mut reader = BufReader::new(device);
            for _ in 0..2 {
                let mut line = String::new();
                reader.read_line(&mut line).await.unwrap();
                let reply = match line.trim() {
                    "verify" => "7",
                    "enroll:42" => "OK:ENROLLED",
                    other => panic!("interleaved command on the wire: {:?}", other),
                };
                reader
                    .get_mut()
                    .write_all(format!("{}\n", reply).as_bytes())
                    .await
                    .unwrap();
            }
        });

        let enroll_chan = chan.clone();
        let verify_chan = chan.clone();
        let (enroll_reply, verify_reply) = tokio::join!(
            async move {
                enroll_chan
                    .send_command(&Command::Enroll("42".to_string()))
                    .await
                    .unwrap()
            },
            async move { verify_chan.send_command(&Command::Verify).await.unwrap() },
        );

        assert_eq!(enroll_reply, "OK:ENROLLED");
        assert_eq!(verify_reply, "7");
    }
}
