//! Unified error type for the volumectl-lib crate.
//!
//! [`VolumeError`] separates the three ways a volume operation can fail:
//! the caller passed a bad level, the external tool failed, or the tool
//! succeeded but printed something we could not read. Callers that care
//! (e.g. to detect a tool version change) can match on the variant.

use std::fmt;

/// Why an external command did not produce usable output.
#[derive(Debug)]
pub enum ExecCause {
    /// The program could not be started at all (missing binary, permissions).
    Spawn(std::io::Error),
    /// The program ran but exited unsuccessfully. `code` is `None` when it
    /// was killed by a signal.
    Status { code: Option<i32>, stderr: String },
}

impl fmt::Display for ExecCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecCause::Spawn(e) => write!(f, "{e}"),
            ExecCause::Status { code, stderr } => {
                match code {
                    Some(c) => write!(f, "exit status {c}")?,
                    None => write!(f, "terminated by signal")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
        }
    }
}

/// Unified error type for volumectl-lib operations.
#[derive(Debug)]
pub enum VolumeError {
    /// Requested volume level is outside 0-100. Raised before any command runs.
    OutOfRange(i32),
    /// External command failed to start or exited non-zero.
    Execution { command: String, cause: ExecCause },
    /// External command succeeded but its output held no recognizable value.
    Parse(String),
    /// Configuration error.
    Config(String),
    /// No native backend for the running platform.
    Unsupported(String),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::OutOfRange(v) => {
                write!(f, "volume {v} is out of valid range (0-100)")
            }
            VolumeError::Execution { command, cause } => {
                write!(f, "failed to execute \"{command}\" ({cause})")
            }
            VolumeError::Parse(e) => write!(f, "Parse error: {e}"),
            VolumeError::Config(e) => write!(f, "Config error: {e}"),
            VolumeError::Unsupported(e) => write!(f, "Unsupported platform: {e}"),
        }
    }
}

impl std::error::Error for VolumeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VolumeError::Execution {
                cause: ExecCause::Spawn(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for VolumeError {
    fn from(e: toml::de::Error) -> Self {
        VolumeError::Config(e.to_string())
    }
}

/// Crate-level Result alias using [`VolumeError`].
pub type Result<T> = std::result::Result<T, VolumeError>;
