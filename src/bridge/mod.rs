//! Remote shell bridge: the channel used to run commands on a device and to
//! move whole files to and from it.

pub mod adb;
pub mod process;
pub mod watch;

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::fs::escape::{escape_for_local_shell, escape_for_remote_shell, escape_for_remote_via_local};

pub use adb::AdbBridge;
pub use process::ExecOutput;
pub use watch::{DeviceEvent, DeviceWatcher};

/// Authorization state reported by device discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Ready,
    Unauthorized,
    Offline,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// One attached device. Only [`DeviceState::Ready`] devices may back a pane.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Device {
    pub serial: String,
    pub state: DeviceState,
}

impl Device {
    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }
}

/// A command destined for the device shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Single program invocation. Flags are fixed literals and stay bare;
    /// every operand is quoted for the device shell on rendering.
    Exec {
        program: &'static str,
        flags: Vec<&'static str>,
        operands: Vec<String>,
    },
    /// Compound text whose operands are already escaped for the device shell.
    Script(String),
}

impl RemoteCommand {
    pub fn exec<I, S>(program: &'static str, flags: &[&'static str], operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exec {
            program,
            flags: flags.to_vec(),
            operands: operands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn script(text: impl Into<String>) -> Self {
        Self::Script(text.into())
    }

    /// Text as the device shell receives it.
    pub fn render_remote(&self) -> String {
        match self {
            Self::Exec {
                program,
                flags,
                operands,
            } => {
                let mut words: Vec<String> = Vec::with_capacity(1 + flags.len() + operands.len());
                words.push((*program).to_string());
                words.extend(flags.iter().map(|f| (*f).to_string()));
                words.extend(operands.iter().map(|o| escape_for_remote_shell(o)));
                words.join(" ")
            }
            Self::Script(text) => text.clone(),
        }
    }

    /// Words to append to a local shell line that forwards to the device shell.
    pub fn render_via_local(&self) -> String {
        match self {
            Self::Exec {
                program,
                flags,
                operands,
            } => {
                let mut words: Vec<String> = Vec::with_capacity(1 + flags.len() + operands.len());
                words.push((*program).to_string());
                words.extend(flags.iter().map(|f| (*f).to_string()));
                words.extend(operands.iter().map(|o| escape_for_remote_via_local(o)));
                words.join(" ")
            }
            Self::Script(text) => escape_for_local_shell(text),
        }
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_remote())
    }
}

/// Device-facing execution primitives.
///
/// `run_remote_shell` reports the remote exit status in [`ExecOutput`] and
/// only errors when the bridge itself could not run. The file primitives
/// error on any failure.
#[async_trait]
pub trait RemoteShellBridge: Send + Sync {
    /// Enumerate attached devices. Discovery failures yield an empty list.
    async fn list_devices(&self) -> Vec<Device>;
    async fn run_remote_shell(
        &self,
        serial: &str,
        command: &RemoteCommand,
    ) -> Result<ExecOutput, ExecError>;
    async fn push_file(&self, serial: &str, local: &Path, remote: &str) -> Result<(), ExecError>;
    async fn pull_file(&self, serial: &str, remote: &str, local: &Path) -> Result<(), ExecError>;
}
