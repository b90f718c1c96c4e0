//! Temporary artifacts created by multi-step operations.
//!
//! Every temp file is registered when it is created and released on every
//! exit path of the operation that made it. Release failures are logged and
//! never replace the caller's own error.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::{debug, warn};

use crate::bridge::{RemoteCommand, RemoteShellBridge};

const NAME_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 8;

/// Collision-resistant temp leaf: `<prefix>_<unix-millis>_<random><suffix>`.
pub fn temp_name(prefix: &str, suffix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let mut rng = rand::thread_rng();
    let random: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
        .collect();
    format!("{prefix}_{millis}_{random}{suffix}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempArtifact {
    Local(PathBuf),
    Remote { serial: String, path: String },
    /// Device directory, removed recursively.
    RemoteDir { serial: String, path: String },
}

/// Ordered registry of temp artifacts awaiting cleanup.
#[derive(Debug, Default)]
pub struct TempArtifacts {
    items: Vec<TempArtifact>,
}

impl TempArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh local temp path under `dir` and register it.
    pub fn local_in(&mut self, dir: &Path, prefix: &str, suffix: &str) -> PathBuf {
        let path = dir.join(temp_name(prefix, suffix));
        self.items.push(TempArtifact::Local(path.clone()));
        path
    }

    /// Reserve a fresh device temp path under `dir` and register it.
    pub fn remote_in(&mut self, serial: &str, dir: &str, prefix: &str, suffix: &str) -> String {
        let path = super::paths::join(dir, &temp_name(prefix, suffix));
        self.items.push(TempArtifact::Remote {
            serial: serial.to_string(),
            path: path.clone(),
        });
        path
    }

    /// Reserve a fresh device directory path under `dir` and register it.
    /// The directory itself is left for the caller to create.
    pub fn remote_dir_in(&mut self, serial: &str, dir: &str, prefix: &str) -> String {
        let path = super::paths::join(dir, &temp_name(prefix, ""));
        self.items.push(TempArtifact::RemoteDir {
            serial: serial.to_string(),
            path: path.clone(),
        });
        path
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every registered artifact, newest first.
    pub async fn release(&mut self, bridge: &dyn RemoteShellBridge) {
        while let Some(item) = self.items.pop() {
            match item {
                TempArtifact::Local(path) => remove_local(&path).await,
                TempArtifact::Remote { serial, path } => {
                    let cmd = RemoteCommand::exec("rm", &["-f"], [path.as_str()]);
                    remove_remote(bridge, &serial, &path, &cmd).await;
                }
                TempArtifact::RemoteDir { serial, path } => {
                    let cmd = RemoteCommand::exec("rm", &["-rf"], [path.as_str()]);
                    remove_remote(bridge, &serial, &path, &cmd).await;
                }
            }
        }
    }
}

async fn remove_remote(bridge: &dyn RemoteShellBridge, serial: &str, path: &str, cmd: &RemoteCommand) {
    match bridge.run_remote_shell(serial, cmd).await {
        Ok(out) if out.success() => debug!(serial, path, "removed remote temp"),
        Ok(out) => warn!(
            serial,
            path,
            code = out.exit_code,
            stderr = out.stderr.trim(),
            "remote temp cleanup failed"
        ),
        Err(e) => warn!(serial, path, error = %e, "remote temp cleanup failed"),
    }
}

async fn remove_local(path: &Path) {
    let result = match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(path).await,
        Ok(_) => tokio::fs::remove_file(path).await,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => debug!(path = %path.display(), "removed local temp"),
        Err(e) => warn!(path = %path.display(), error = %e, "local temp cleanup failed"),
    }
}

impl Drop for TempArtifacts {
    fn drop(&mut self) {
        for item in self.items.drain(..) {
            match item {
                TempArtifact::Local(path) => {
                    if let Err(e) = std::fs::remove_file(&path) {
                        if e.kind() != std::io::ErrorKind::NotFound {
                            warn!(path = %path.display(), error = %e, "unreleased local temp left behind");
                        }
                    }
                }
                TempArtifact::Remote { serial, path } | TempArtifact::RemoteDir { serial, path } => {
                    warn!(%serial, %path, "unreleased remote temp left behind");
                }
            }
        }
    }
}
