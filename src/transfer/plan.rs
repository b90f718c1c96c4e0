//! Transfer planning: the dispatch matrix and the per-invocation plan.

use std::fmt;

use crate::error::FsError;
use crate::fs::temp::TempArtifacts;
use crate::fs::{paths, BackendBinding};

/// One step of a transfer, named in [`FsError::Transfer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStep {
    Package,
    Push,
    Extract,
    Rename,
    Pull,
    Copy,
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Package => "package",
            Self::Push => "push",
            Self::Extract => "extract",
            Self::Rename => "rename",
            Self::Pull => "pull",
            Self::Copy => "copy",
        };
        f.write_str(name)
    }
}

/// What is being moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSource {
    pub binding: BackendBinding,
    pub path: String,
    pub is_directory: bool,
}

/// Where it lands. `path` is the full destination path, leaf included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDest {
    pub binding: BackendBinding,
    pub path: String,
}

/// Selected mechanism for one `(source kind, dest kind)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStrategy {
    LocalCopy,
    PushFile { serial: String },
    TarPush { serial: String },
    Pull { serial: String },
    RemoteCopy { serial: String },
}

impl TransferStrategy {
    fn label(&self) -> &'static str {
        match self {
            Self::LocalCopy => "local-copy",
            Self::PushFile { .. } => "push",
            Self::TarPush { .. } => "tar-push",
            Self::Pull { .. } => "pull",
            Self::RemoteCopy { .. } => "remote-copy",
        }
    }
}

impl fmt::Display for TransferStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transient state for one transfer invocation.
#[derive(Debug)]
pub struct TransferPlan {
    pub source: TransferSource,
    pub dest: TransferDest,
    pub strategy: TransferStrategy,
    pub temps: TempArtifacts,
}

impl TransferPlan {
    /// Pick the strategy. Remote-to-remote across two devices is rejected here,
    /// before any bridge call.
    pub fn build(source: TransferSource, dest: TransferDest) -> Result<Self, FsError> {
        let strategy = match (&source.binding, &dest.binding) {
            (BackendBinding::Local, BackendBinding::Local) => TransferStrategy::LocalCopy,
            (BackendBinding::Local, BackendBinding::Remote { serial }) => {
                if source.is_directory {
                    TransferStrategy::TarPush {
                        serial: serial.clone(),
                    }
                } else {
                    TransferStrategy::PushFile {
                        serial: serial.clone(),
                    }
                }
            }
            (BackendBinding::Remote { serial }, BackendBinding::Local) => TransferStrategy::Pull {
                serial: serial.clone(),
            },
            (BackendBinding::Remote { serial: from }, BackendBinding::Remote { serial: to }) => {
                if from != to {
                    return Err(FsError::UnsupportedCrossDevice {
                        source: from.clone(),
                        dest: to.clone(),
                    });
                }
                TransferStrategy::RemoteCopy {
                    serial: from.clone(),
                }
            }
        };
        Ok(Self {
            source,
            dest,
            strategy,
            temps: TempArtifacts::new(),
        })
    }

    /// True when the tar strategy must move the extracted tree afterwards.
    pub fn needs_rename(&self) -> bool {
        paths::leaf(&self.source.path) != paths::leaf(&self.dest.path)
    }
}

/// Destination path for dropping `name` into directory `dir`.
pub fn destination_path(dir: &str, name: &str) -> String {
    paths::join(dir, name)
}
