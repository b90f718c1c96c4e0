//! Device filesystem gateway reached through a [`RemoteShellBridge`].

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::bridge::process::ensure_success;
use crate::bridge::{ExecOutput, RemoteCommand, RemoteShellBridge};
use crate::error::{ExecError, FsError};

use super::contracts::Backend;
use super::entry::{BackendKind, FileEntry};
use super::listing::{ListingParser, LsLongParser};
use super::temp::TempArtifacts;

/// Gateway over one device's filesystem.
///
/// Every operation requires a bound serial; an unbound gateway fails with
/// [`FsError::NoDeviceBound`] before touching the bridge.
#[derive(Clone)]
pub struct RemoteGateway {
    bridge: Arc<dyn RemoteShellBridge>,
    serial: Option<String>,
    parser: Arc<dyn ListingParser>,
    root: String,
    local_temp_dir: PathBuf,
}

impl std::fmt::Debug for RemoteGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteGateway")
            .field("serial", &self.serial)
            .field("root", &self.root)
            .field("local_temp_dir", &self.local_temp_dir)
            .finish_non_exhaustive()
    }
}

impl RemoteGateway {
    pub fn new(
        bridge: Arc<dyn RemoteShellBridge>,
        serial: Option<String>,
        root: impl Into<String>,
        local_temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bridge,
            serial,
            parser: Arc::new(LsLongParser),
            root: super::paths::normalize(&root.into()),
            local_temp_dir: local_temp_dir.into(),
        }
    }

    /// Replace the listing parser.
    pub fn with_parser(mut self, parser: Arc<dyn ListingParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn serial(&self) -> Result<&str, FsError> {
        self.serial.as_deref().ok_or(FsError::NoDeviceBound)
    }

    async fn shell(&self, command: &RemoteCommand) -> Result<ExecOutput, FsError> {
        let serial = self.serial()?;
        debug!(serial, command = %command, "remote gateway command");
        self.bridge
            .run_remote_shell(serial, command)
            .await
            .map_err(|e| FsError::Access(e.to_string()))
    }

    /// Run `command` and treat a non-zero exit as failure, mapped by `wrap`.
    async fn shell_checked(
        &self,
        command: RemoteCommand,
        wrap: fn(String) -> FsError,
    ) -> Result<ExecOutput, FsError> {
        let serial = self.serial()?;
        let rendered = command.render_remote();
        let output = self
            .bridge
            .run_remote_shell(serial, &command)
            .await
            .map_err(|e| wrap(e.to_string()))?;
        ensure_success(output, &rendered).map_err(|e: ExecError| wrap(e.to_string()))
    }
}

#[async_trait]
impl Backend for RemoteGateway {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn default_root(&self) -> String {
        self.root.clone()
    }

    async fn list(&self, path: &str) -> Result<Vec<FileEntry>, FsError> {
        let command = self.parser.command(path);
        let output = self.shell(&command).await?;
        let output =
            ensure_success(output, &command.render_remote()).map_err(|e| FsError::Access(e.to_string()))?;
        Ok(self.parser.parse(&output.stdout))
    }

    async fn stat_directory_size(&self, path: &str) -> u64 {
        let command = RemoteCommand::exec("du", &["-s", "-k"], [path]);
        match self.shell_checked(command, FsError::Access).await {
            Ok(output) => parse_du_kib(&output.stdout).map_or(0, |kib| kib.saturating_mul(1024)),
            Err(e) => {
                debug!(path, error = %e, "remote size failed");
                0
            }
        }
    }

    async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let serial = self.serial()?;
        let mut temps = TempArtifacts::new();
        let local = temps.local_in(&self.local_temp_dir, "temp_read", "");
        let result = async {
            self.bridge
                .pull_file(serial, path, &local)
                .await
                .map_err(|e| FsError::Read(format!("{path}: {e}")))?;
            let bytes = tokio::fs::read(&local)
                .await
                .map_err(|e| FsError::Read(format!("{path}: {e}")))?;
            String::from_utf8(bytes).map_err(|_| FsError::Read(format!("{path}: not UTF-8 text")))
        }
        .await;
        temps.release(self.bridge.as_ref()).await;
        result
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), FsError> {
        let serial = self.serial()?;
        let mut temps = TempArtifacts::new();
        let local = temps.local_in(&self.local_temp_dir, "temp_edit", "");
        let result = async {
            tokio::fs::write(&local, content)
                .await
                .map_err(|e| FsError::Write(format!("{}: {e}", local.display())))?;
            self.bridge
                .push_file(serial, &local, path)
                .await
                .map_err(|e| FsError::Write(format!("{path}: {e}")))
        }
        .await;
        temps.release(self.bridge.as_ref()).await;
        result
    }

    async fn delete(&self, path: &str, is_directory: bool) -> Result<(), FsError> {
        let flags: &[&'static str] = if is_directory { &["-rf"] } else { &["-f"] };
        self.shell_checked(RemoteCommand::exec("rm", flags, [path]), FsError::Delete)
            .await
            .map(|_| ())
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), FsError> {
        self.shell_checked(
            RemoteCommand::exec("mv", &[], [old_path, new_path]),
            FsError::Rename,
        )
        .await
        .map(|_| ())
    }

    async fn copy_same_backend(&self, source: &str, dest: &str) -> Result<(), FsError> {
        self.shell_checked(
            RemoteCommand::exec("cp", &["-r"], [source, dest]),
            FsError::Copy,
        )
        .await
        .map(|_| ())
    }
}

/// First token of `du -s -k` output, in KiB.
fn parse_du_kib(stdout: &str) -> Option<u64> {
    stdout.split_whitespace().next()?.parse().ok()
}
