//! Long-running device tracker.
//!
//! `adb track-devices` prints a block whenever the attached set changes. The
//! watcher turns each stdout chunk into a [`DeviceEvent::ListChanged`] and
//! leaves re-listing to the receiver.

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ExecError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    ListChanged,
    WatcherStopped { code: Option<i32> },
}

/// Handle to a running tracker. Dropping it kills the child process.
#[derive(Debug)]
pub struct DeviceWatcher {
    task: JoinHandle<()>,
}

impl DeviceWatcher {
    /// Start `<program> track-devices`.
    pub fn spawn(program: &str) -> Result<(Self, mpsc::Receiver<DeviceEvent>), ExecError> {
        Self::spawn_command(program, &["track-devices"])
    }

    pub fn spawn_command(
        program: &str,
        args: &[&str],
    ) -> Result<(Self, mpsc::Receiver<DeviceEvent>), ExecError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecError::Spawn(format!("{program}: {e}")))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecError::Spawn(format!("{program}: stdout not captured")))?;
        info!(program, "device tracking started");

        let (tx, rx) = mpsc::channel(16);
        let task = tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            loop {
                match stdout.read(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => {
                        debug!(bytes = n, "device list changed");
                        if tx.send(DeviceEvent::ListChanged).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "device tracker read failed");
                        break;
                    }
                }
            }
            let code = match child.wait().await {
                Ok(status) => status.code(),
                Err(e) => {
                    warn!(error = %e, "device tracker wait failed");
                    None
                }
            };
            info!(?code, "device tracking stopped");
            let _ = tx.send(DeviceEvent::WatcherStopped { code }).await;
        });

        Ok((Self { task }, rx))
    }
}

impl Drop for DeviceWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
