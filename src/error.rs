//! Unified error types for the file manager core.

use std::fmt;

use crate::transfer::TransferStep;

// ---------------------------------------------------------------------------
// ExecError
// ---------------------------------------------------------------------------

/// Errors arising from spawning external programs (`adb`, `sh`, `tar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The program could not be started at all.
    Spawn(String),
    /// The program did not finish inside its time limit.
    TimedOut(String),
    /// The program ran but reported failure.
    Failed(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(msg) => write!(f, "spawn failed: {msg}"),
            Self::TimedOut(msg) => write!(f, "timed out: {msg}"),
            Self::Failed(msg) => write!(f, "command failed: {msg}"),
        }
    }
}

impl std::error::Error for ExecError {}

// ---------------------------------------------------------------------------
// FsError
// ---------------------------------------------------------------------------

/// Typed failures of backend, transfer, and pane operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// Listing/stat denied or target missing.
    Access(String),
    Read(String),
    Write(String),
    Delete(String),
    Rename(String),
    Copy(String),
    /// One step of a multi-step transfer plan failed.
    Transfer { step: TransferStep, message: String },
    /// A remote operation was attempted without a device serial.
    NoDeviceBound,
    /// Remote-to-remote copy between two different devices.
    UnsupportedCrossDevice { source: String, dest: String },
    /// A pane was bound to a device that is missing or not authorized.
    DeviceNotReady(String),
    /// Handing a file to the system viewer failed.
    Open(String),
    /// Navigation into something that is not a directory.
    NotADirectory(String),
    /// A pane operation needed a selection and there was none.
    NothingSelected,
}

impl FsError {
    /// Wrap a lower-level failure as a failed transfer step.
    pub fn transfer(step: TransferStep, err: impl fmt::Display) -> Self {
        Self::Transfer {
            step,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access(msg) => write!(f, "access denied: {msg}"),
            Self::Read(msg) => write!(f, "read failed: {msg}"),
            Self::Write(msg) => write!(f, "write failed: {msg}"),
            Self::Delete(msg) => write!(f, "delete failed: {msg}"),
            Self::Rename(msg) => write!(f, "rename failed: {msg}"),
            Self::Copy(msg) => write!(f, "copy failed: {msg}"),
            Self::Transfer { step, message } => write!(f, "transfer failed at {step}: {message}"),
            Self::NoDeviceBound => write!(f, "no device bound to remote backend"),
            Self::UnsupportedCrossDevice { source, dest } => write!(
                f,
                "copying between different devices ({source} -> {dest}) is not supported"
            ),
            Self::DeviceNotReady(serial) => write!(f, "device not ready: {serial}"),
            Self::Open(msg) => write!(f, "open failed: {msg}"),
            Self::NotADirectory(name) => write!(f, "not a directory: {name}"),
            Self::NothingSelected => write!(f, "no entry selected"),
        }
    }
}

impl std::error::Error for FsError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}
