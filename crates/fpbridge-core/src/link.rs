//! DeviceLink trait - the core abstraction over the device connection

use async_trait::async_trait;

use crate::command::Command;
use crate::error::BridgeResult;

/// A link that can exchange one command for one reply line with the device.
///
/// Implementations send the command's wire form followed by a newline, then
/// read back a single line of text. A reply of `""` means the device sent
/// nothing before the read deadline; callers do not distinguish that from a
/// genuinely empty reply.
#[async_trait]
pub trait DeviceLink: Send + Sync {
    /// Send one command and return the device's stripped reply line
    async fn send_command(&self, cmd: &Command) -> BridgeResult<String>;
}
