//! Local disk gateway.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::FsError;

use super::contracts::Backend;
use super::entry::{BackendKind, FileEntry, LocalStat};
use super::listing::parse_local_listing;

/// Gateway over the host filesystem.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    root: String,
}

impl LocalGateway {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: super::paths::normalize(&root.into()),
        }
    }
}

#[async_trait]
impl Backend for LocalGateway {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn default_root(&self) -> String {
        self.root.clone()
    }

    async fn list(&self, path: &str) -> Result<Vec<FileEntry>, FsError> {
        let mut dir = tokio::fs::read_dir(path)
            .await
            .map_err(|e| FsError::Access(format!("{path}: {e}")))?;
        let mut records = Vec::new();
        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(FsError::Access(format!("{path}: {e}"))),
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so linked directories list as directories.
            let record = tokio::fs::metadata(entry.path()).await.map(|meta| LocalStat {
                name,
                is_directory: meta.is_dir(),
                size: meta.len(),
                modified: meta.modified().ok(),
            });
            records.push(record);
        }
        Ok(parse_local_listing(records))
    }

    async fn stat_directory_size(&self, path: &str) -> u64 {
        let owned = path.to_string();
        match tokio::task::spawn_blocking(move || tree_size(Path::new(&owned))).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                debug!(path, error = %e, "local size failed");
                0
            }
            Err(e) => {
                debug!(path, error = %e, "local size task failed");
                0
            }
        }
    }

    async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FsError::Read(format!("{path}: {e}")))?;
        String::from_utf8(bytes).map_err(|_| FsError::Read(format!("{path}: not UTF-8 text")))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), FsError> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| FsError::Write(format!("{path}: {e}")))
    }

    async fn delete(&self, path: &str, is_directory: bool) -> Result<(), FsError> {
        let result = if is_directory {
            match tokio::fs::remove_dir_all(path).await {
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            }
        } else {
            tokio::fs::remove_file(path).await
        };
        result.map_err(|e| FsError::Delete(format!("{path}: {e}")))
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), FsError> {
        tokio::fs::rename(old_path, new_path)
            .await
            .map_err(|e| FsError::Rename(format!("{old_path} -> {new_path}: {e}")))
    }

    async fn copy_same_backend(&self, source: &str, dest: &str) -> Result<(), FsError> {
        debug!(source, dest, "local copy");
        let (src, dst) = (source.to_string(), dest.to_string());
        tokio::task::spawn_blocking(move || {
            check_copy_target(Path::new(&src), Path::new(&dst))?;
            copy_tree(Path::new(&src), Path::new(&dst))
        })
        .await
        .map_err(|e| FsError::Copy(format!("{source}: {e}")))?
        .map_err(|e| FsError::Copy(format!("{source} -> {dest}: {e}")))
    }
}

/// Sum of regular-file sizes under `root`, without following symlinks.
/// Unreadable subdirectories are skipped; an unreadable root is an error.
fn tree_size(root: &Path) -> io::Result<u64> {
    let meta = std::fs::symlink_metadata(root)?;
    if !meta.is_dir() {
        return Ok(if meta.is_file() { meta.len() } else { 0 });
    }
    let mut total = 0u64;
    let mut pending = vec![root.to_path_buf()];
    let mut first = true;
    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if first => return Err(e),
            Err(_) => continue,
        };
        first = false;
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else { continue };
            if meta.is_dir() {
                pending.push(entry.path());
            } else if meta.is_file() {
                total = total.saturating_add(meta.len());
            }
        }
    }
    Ok(total)
}

/// Refuse a copy onto the source itself or into the source's own subtree.
fn check_copy_target(source: &Path, dest: &Path) -> io::Result<()> {
    let source = std::fs::canonicalize(source)?;
    let dest = resolve_target(dest)?;
    if dest == source {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same",
        ));
    }
    if source.is_dir() && dest.starts_with(&source) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "destination is inside the source directory",
        ));
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet: the deepest existing
/// ancestor is canonicalized and the missing tail re-appended.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut cursor = path;
    loop {
        match std::fs::canonicalize(cursor) {
            Ok(base) => {
                return Ok(missing.iter().rev().fold(base, |acc, part| acc.join(part)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (cursor.parent(), cursor.file_name()) else {
                    return Err(e);
                };
                missing.push(name.to_os_string());
                cursor = parent;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Copy a file or tree. Symlinks are recreated as links.
fn copy_tree(source: &Path, dest: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(source)?;
    if meta.file_type().is_symlink() {
        let target = std::fs::read_link(source)?;
        return std::os::unix::fs::symlink(target, dest);
    }
    if !meta.is_dir() {
        return std::fs::copy(source, dest).map(|_| ());
    }
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        copy_tree(&entry.path(), &dest.join(entry.file_name()))?;
    }
    Ok(())
}
