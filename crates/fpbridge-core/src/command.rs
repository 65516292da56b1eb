//! Command wire model for the fingerprint device
//!
//! The device speaks a line-oriented text protocol: each command is a single
//! newline-terminated line, each reply is a single newline-terminated line.

use std::fmt;

/// A command understood by the fingerprint device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enroll a fingerprint under the given student id
    Enroll(String),
    /// Ask the device which enrolled student the current fingerprint matches
    Verify,
}

impl Command {
    /// Render the on-the-wire text, without the trailing newline.
    ///
    /// The transport appends the `\n` terminator when sending.
    pub fn wire(&self) -> String {
        match self {
            Command::Enroll(student_id) => format!("enroll:{}", student_id),
            Command::Verify => "verify".to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Enroll(student_id) => write!(f, "enroll:{}", student_id),
            Command::Verify => write!(f, "verify"),
        }
    }
}
