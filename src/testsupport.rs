//! Shared test fixtures for gateway, transfer, and session test modules.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::bridge::process::{ensure_success, run_process, run_sh_process};
use crate::bridge::{Device, DeviceState, ExecOutput, RemoteCommand, RemoteShellBridge};
use crate::error::ExecError;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "droidpane-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One call observed by [`RecordingBridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Shell { serial: String, command: String },
    Push { serial: String, local: PathBuf, remote: String },
    Pull { serial: String, remote: String, local: PathBuf },
}

/// Fake bridge whose "device" is the host itself.
///
/// Remote paths in tests are real host paths under a fixture directory, so
/// shell commands run verbatim through `sh` and push/pull are `cp -R`. Every
/// call is recorded before it runs.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    calls: Mutex<Vec<BridgeCall>>,
    devices: Vec<Device>,
    canned: Vec<(String, String)>,
    failing: Vec<String>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devices(mut self, devices: &[(&str, DeviceState)]) -> Self {
        self.devices = devices
            .iter()
            .map(|(serial, state)| Device {
                serial: (*serial).to_string(),
                state: *state,
            })
            .collect();
        self
    }

    /// Answer shell commands starting with `prefix` with `stdout` instead of running them.
    pub fn with_canned_stdout(mut self, prefix: &str, stdout: &str) -> Self {
        self.canned.push((prefix.to_string(), stdout.to_string()));
        self
    }

    /// Fail shell commands starting with `prefix`; `push`/`pull` fail file moves.
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Rendered device-shell text of every shell call, in order.
    pub fn shell_commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BridgeCall::Shell { command, .. } => Some(command),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn fails(&self, text: &str) -> bool {
        self.failing.iter().any(|prefix| text.starts_with(prefix.as_str()))
    }

    async fn copy(&self, from: &str, to: &str, context: &str) -> Result<(), ExecError> {
        let output = run_process("cp", &["-R".into(), from.into(), to.into()]).await?;
        ensure_success(output, context).map(|_| ())
    }
}

#[async_trait]
impl RemoteShellBridge for RecordingBridge {
    async fn list_devices(&self) -> Vec<Device> {
        self.devices.clone()
    }

    async fn run_remote_shell(
        &self,
        serial: &str,
        command: &RemoteCommand,
    ) -> Result<ExecOutput, ExecError> {
        let text = command.render_remote();
        self.record(BridgeCall::Shell {
            serial: serial.to_string(),
            command: text.clone(),
        });
        if self.fails(&text) {
            return Ok(ExecOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: format!("injected failure: {text}"),
            });
        }
        if let Some((_, stdout)) = self.canned.iter().find(|(prefix, _)| text.starts_with(prefix.as_str())) {
            return Ok(ExecOutput {
                exit_code: 0,
                stdout: stdout.clone(),
                stderr: String::new(),
            });
        }
        run_sh_process(&text).await
    }

    async fn push_file(&self, serial: &str, local: &Path, remote: &str) -> Result<(), ExecError> {
        self.record(BridgeCall::Push {
            serial: serial.to_string(),
            local: local.to_path_buf(),
            remote: remote.to_string(),
        });
        if self.fails("push") {
            return Err(ExecError::Failed("injected push failure".into()));
        }
        self.copy(&local.display().to_string(), remote, "push").await
    }

    async fn pull_file(&self, serial: &str, remote: &str, local: &Path) -> Result<(), ExecError> {
        self.record(BridgeCall::Pull {
            serial: serial.to_string(),
            remote: remote.to_string(),
            local: local.to_path_buf(),
        });
        if self.fails("pull") {
            return Err(ExecError::Failed("injected pull failure".into()));
        }
        self.copy(remote, &local.display().to_string(), "pull").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn recording_bridge_runs_and_records_shell_text() {
        let bridge = RecordingBridge::new();
        let out = bridge
            .run_remote_shell("emu", &RemoteCommand::exec("echo", &[], ["a b"]))
            .await
            .unwrap();
        assert_eq!(out.stdout, "a b\n");
        assert_eq!(bridge.shell_commands(), vec!["echo \"a b\"".to_string()]);
    }

    #[tokio::test]
    async fn recording_bridge_injects_failures() {
        let bridge = RecordingBridge::new().failing_on("tar").failing_on("push");
        let out = bridge
            .run_remote_shell("emu", &RemoteCommand::exec("tar", &["-xf"], ["/x"]))
            .await
            .unwrap();
        assert_eq!(out.exit_code, 1);
        assert!(bridge
            .push_file("emu", Path::new("/nonexistent"), "/tmp/x")
            .await
            .is_err());
    }
}
