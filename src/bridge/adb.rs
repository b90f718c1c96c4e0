//! `adb`-backed implementation of [`RemoteShellBridge`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::process::{ensure_success, run_process, run_sh_process, run_with_timeout, ExecOutput};
use super::{Device, DeviceState, RemoteCommand, RemoteShellBridge};
use crate::config::BridgeConfig;
use crate::error::ExecError;
use crate::fs::escape::escape_for_local_shell;

/// Bridge that shells out to the `adb` client.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: String,
    command_timeout: Duration,
    transfer_timeout: Duration,
}

impl AdbBridge {
    pub fn new(program: impl Into<String>, command_timeout: Duration, transfer_timeout: Duration) -> Self {
        Self {
            program: program.into(),
            command_timeout,
            transfer_timeout,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(
            config.program.clone(),
            Duration::from_secs(config.command_timeout_secs),
            Duration::from_secs(config.transfer_timeout_secs),
        )
    }

    /// Full local shell line that forwards `command` to the device shell.
    pub fn shell_line(&self, serial: &str, command: &RemoteCommand) -> String {
        format!(
            "{} -s {} shell {}",
            escape_for_local_shell(&self.program),
            escape_for_local_shell(serial),
            command.render_via_local()
        )
    }

    async fn run_file_transfer(&self, args: Vec<String>, context: String) -> Result<(), ExecError> {
        let output = run_with_timeout(
            run_process(&self.program, &args),
            self.transfer_timeout,
            &context,
        )
        .await?;
        ensure_success(output, &context).map(|_| ())
    }
}

#[async_trait]
impl RemoteShellBridge for AdbBridge {
    async fn list_devices(&self) -> Vec<Device> {
        let result = run_with_timeout(
            run_process(&self.program, &["devices".to_string()]),
            self.command_timeout,
            "adb devices",
        )
        .await
        .and_then(|output| ensure_success(output, "adb devices"));
        match result {
            Ok(output) => parse_device_list(&output.stdout),
            Err(e) => {
                warn!(error = %e, "device discovery failed");
                Vec::new()
            }
        }
    }

    async fn run_remote_shell(
        &self,
        serial: &str,
        command: &RemoteCommand,
    ) -> Result<ExecOutput, ExecError> {
        let line = self.shell_line(serial, command);
        debug!(serial, command = %command, "remote shell");
        run_with_timeout(
            run_sh_process(&line),
            self.command_timeout,
            &format!("adb shell {command}"),
        )
        .await
    }

    async fn push_file(&self, serial: &str, local: &Path, remote: &str) -> Result<(), ExecError> {
        let local = local.display().to_string();
        let context = format!("adb push {local} {remote}");
        let args = vec![
            "-s".to_string(),
            serial.to_string(),
            "push".to_string(),
            local,
            remote.to_string(),
        ];
        self.run_file_transfer(args, context).await
    }

    async fn pull_file(&self, serial: &str, remote: &str, local: &Path) -> Result<(), ExecError> {
        let local = local.display().to_string();
        let context = format!("adb pull {remote} {local}");
        let args = vec![
            "-s".to_string(),
            serial.to_string(),
            "pull".to_string(),
            remote.to_string(),
            local,
        ];
        self.run_file_transfer(args, context).await
    }
}

/// Parse `adb devices` output: a header line, then `serial<TAB>state` rows.
pub fn parse_device_list(stdout: &str) -> Vec<Device> {
    stdout
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let serial = parts.next()?.trim();
            let state = parts.next()?.trim();
            if serial.is_empty() {
                return None;
            }
            Some(Device {
                serial: serial.to_string(),
                state: match state {
                    "device" => DeviceState::Ready,
                    "unauthorized" => DeviceState::Unauthorized,
                    _ => DeviceState::Offline,
                },
            })
        })
        .collect()
}
