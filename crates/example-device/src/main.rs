//! Example fingerprint device simulator
//!
//! Speaks the device side of the bridge's serial wire contract for testing
//! fpbridged without hardware:
//!
//!   enroll:<id>  →  OK:ENROLLED:<id>
//!   verify       →  <last enrolled id, or --student-id>
//!   anything else → ERR:UNKNOWN
//!
//! # Usage
//!
//! Create a pty pair and point the daemon at one end:
//! ```bash
//! socat -d -d pty,raw,echo=0,link=/tmp/bridge pty,raw,echo=0,link=/tmp/device
//! ./example-device --port /tmp/device
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "example-device")]
#[command(about = "Fingerprint device simulator for bridge development")]
struct Args {
    /// Serial port to serve on (e.g. one end of a socat pty pair)
    #[arg(short, long)]
    port: String,

    /// Baud rate
    #[arg(short, long, default_value_t = 9600)]
    baud: u32,

    /// Student id reported by `verify` when nothing has been enrolled yet
    #[arg(long, default_value = "42")]
    student_id: String,

    /// Simulated sensor processing time before each reply, in milliseconds
    #[arg(long, default_value_t = 200)]
    process_millis: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "example_device=debug"
    } else {
        "example_device=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(port = %args.port, baud = args.baud, "Starting fingerprint device simulator");

    let port = tokio_serial::new(&args.port, args.baud).open_native_async()?;
    let mut io = BufReader::new(port);
    let mut last_enrolled: Option<String> = None;

    let mut line = String::new();
    loop {
        line.clear();
        let n = io.read_line(&mut line).await?;
        if n == 0 {
            info!("Port closed, exiting");
            return Ok(());
        }

        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        debug!(command = %command, "received command");

        // The real sensor needs time to capture and match a print; the
        // bridge paces itself around this.
        tokio::time::sleep(Duration::from_millis(args.process_millis)).await;

        let reply = match command.split_once(':') {
            Some(("enroll", id)) if !id.is_empty() => {
                info!(student_id = %id, "enrolled fingerprint");
                last_enrolled = Some(id.to_string());
                format!("OK:ENROLLED:{}", id)
            }
            None if command == "verify" => {
                let id = last_enrolled.as_deref().unwrap_or(&args.student_id);
                info!(student_id = %id, "verified fingerprint");
                id.to_string()
            }
            _ => {
                warn!(command = %command, "unknown command");
                "ERR:UNKNOWN".to_string()
            }
        };

        io.get_mut()
            .write_all(format!("{}\n", reply).as_bytes())
            .await?;
    }
}
