//! Configuration data model.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    default_local_root, default_local_temp_dir, default_open_command, DEFAULT_BINARY_EXTENSIONS,
    DEFAULT_BRIDGE_PROGRAM, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_REMOTE_ROOT,
    DEFAULT_REMOTE_TEMP_DIR, DEFAULT_TRANSFER_TIMEOUT_SECS,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub paths: PathsConfig,
    pub viewer: ViewerConfig,
}

/// Remote shell bridge settings (`[bridge]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Bridge client executable.
    pub program: String,
    /// Limit for shell commands and device listing.
    pub command_timeout_secs: u64,
    /// Limit for push, pull, and local archive creation.
    pub transfer_timeout_secs: u64,
    pub remote_temp_dir: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_BRIDGE_PROGRAM.into(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            transfer_timeout_secs: DEFAULT_TRANSFER_TIMEOUT_SECS,
            remote_temp_dir: DEFAULT_REMOTE_TEMP_DIR.into(),
        }
    }
}

/// Default roots and staging locations (`[paths]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub local_root: String,
    pub remote_root: String,
    pub local_temp_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            local_root: default_local_root(),
            remote_root: DEFAULT_REMOTE_ROOT.into(),
            local_temp_dir: default_local_temp_dir(),
        }
    }
}

/// Viewer classification and external opener (`[viewer]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    pub binary_extensions: Vec<String>,
    pub open_command: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            open_command: default_open_command().into(),
        }
    }
}

/// Result of initializing the global config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created {
        path: PathBuf,
    },
    AlreadyInitialized {
        path: PathBuf,
    },
    Overwritten {
        path: PathBuf,
        backup_path: PathBuf,
    },
}
