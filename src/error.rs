use std::io;
use thiserror::Error;

/// Exit status used when adb is missing or no usable device is attached.
#[cfg(unix)]
pub const EXIT_NO_DEVICE: i32 = libc::ENXIO;

/// Exit status used when adb is missing or no usable device is attached.
#[cfg(not(unix))]
pub const EXIT_NO_DEVICE: i32 = 6;

/// Custom error type for the status line
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("adb not found!! ({0})")]
    ToolMissing(String),

    #[error("No device detected!!")]
    NoDevice,

    #[error("{0} is an invalid device!")]
    InvalidDevice(String),

    #[error("adb failed: {0}")]
    Bridge(String),

    #[error("Could not parse {metric}: {reason}")]
    Parse { metric: &'static str, reason: String },

    #[error("Invalid maximum {0}: a reference maximum of zero cannot be colorized")]
    InvalidMaximum(f64),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for the status line
pub type Result<T> = std::result::Result<T, StatusError>;

impl StatusError {
    /// Create a parse error for the named metric
    pub fn parse<S: Into<String>>(metric: &'static str, reason: S) -> Self {
        StatusError::Parse {
            metric,
            reason: reason.into(),
        }
    }

    /// Create a device bridge error
    pub fn bridge<S: Into<String>>(msg: S) -> Self {
        StatusError::Bridge(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        StatusError::Config(msg.into())
    }

    pub fn tool_missing<S: Into<String>>(msg: S) -> Self {
        StatusError::ToolMissing(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// Discovery failures share the POSIX "no such device" code so that
    /// status bars can tell an unplugged phone apart from a real failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            StatusError::ToolMissing(_) | StatusError::NoDevice | StatusError::InvalidDevice(_) => {
                EXIT_NO_DEVICE
            }
            _ => 1,
        }
    }
}
