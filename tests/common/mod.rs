//! Shared fixtures for integration tests.
//!
//! `HostBridge` plays the device: remote paths are host paths under a
//! fixture directory, shell text runs through `sh`, and push/pull copy files.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use droidpane::bridge::{Device, DeviceState, ExecOutput, RemoteCommand, RemoteShellBridge};
use droidpane::config::Config;
use droidpane::error::ExecError;
use tokio::process::Command;

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct Fixture {
    pub root: PathBuf,
}

impl Fixture {
    pub fn new(prefix: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let root = std::env::temp_dir().join(format!(
            "droidpane-it-{prefix}-{}-{millis}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        for sub in ["host", "device", "host-tmp", "device-tmp"] {
            std::fs::create_dir_all(root.join(sub)).expect("fixture dirs");
        }
        Self { root }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn path_str(&self, relative: &str) -> String {
        self.path(relative).display().to_string()
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("fixture parent");
        }
        std::fs::write(&path, content).expect("fixture write");
        path
    }

    /// Config rooted in this fixture: `host/` is local, `device/` is remote.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.paths.local_root = self.path_str("host");
        config.paths.remote_root = self.path_str("device");
        config.paths.local_temp_dir = self.path("host-tmp");
        config.bridge.remote_temp_dir = self.path_str("device-tmp");
        config.viewer.open_command = "true".into();
        config
    }

    pub fn is_empty_dir(&self, relative: &str) -> bool {
        std::fs::read_dir(self.path(relative))
            .map(|mut it| it.next().is_none())
            .unwrap_or(false)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Shell(String),
    Push(PathBuf, String),
    Pull(String, PathBuf),
}

#[derive(Default)]
pub struct HostBridge {
    calls: Mutex<Vec<Call>>,
    fail_prefix: Option<String>,
}

impl HostBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Shell commands starting with `prefix` exit 1 without running.
    pub fn failing(prefix: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_prefix: Some(prefix.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn shell_commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Shell(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls").push(call);
    }
}

async fn run(program: &str, args: &[&str]) -> Result<ExecOutput, ExecError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| ExecError::Spawn(e.to_string()))?;
    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

async fn copy(from: &str, to: &str) -> Result<(), ExecError> {
    let out = run("cp", &["-R", from, to]).await?;
    if out.exit_code != 0 {
        return Err(ExecError::Failed(out.stderr));
    }
    Ok(())
}

#[async_trait]
impl RemoteShellBridge for HostBridge {
    async fn list_devices(&self) -> Vec<Device> {
        vec![Device {
            serial: "emu".into(),
            state: DeviceState::Ready,
        }]
    }

    async fn run_remote_shell(
        &self,
        _serial: &str,
        command: &RemoteCommand,
    ) -> Result<ExecOutput, ExecError> {
        let text = command.render_remote();
        self.record(Call::Shell(text.clone()));
        if self
            .fail_prefix
            .as_deref()
            .is_some_and(|prefix| text.starts_with(prefix))
        {
            return Ok(ExecOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: "injected".into(),
            });
        }
        // Device listings use toybox's `YYYY-MM-DD HH:MM` columns (GNU ls here).
        let script = match text.strip_prefix("ls -l ") {
            Some(rest) => format!("ls -l '--time-style=+%Y-%m-%d %H:%M' {rest}"),
            None => text,
        };
        run("sh", &["-c", &script]).await
    }

    async fn push_file(&self, _serial: &str, local: &Path, remote: &str) -> Result<(), ExecError> {
        self.record(Call::Push(local.to_path_buf(), remote.to_string()));
        copy(&local.display().to_string(), remote).await
    }

    async fn pull_file(&self, _serial: &str, remote: &str, local: &Path) -> Result<(), ExecError> {
        self.record(Call::Pull(remote.to_string(), local.to_path_buf()));
        copy(remote, &local.display().to_string()).await
    }
}
