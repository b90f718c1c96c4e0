//! Backend capability shared by the local and remote gateways.

use async_trait::async_trait;

use crate::error::FsError;

use super::entry::{BackendKind, FileEntry};

/// Primitive operations against one storage backend.
///
/// Paths are absolute `/`-separated strings scoped to the backend.
#[async_trait]
pub trait Backend: Send + Sync {
    fn kind(&self) -> BackendKind;
    /// Path a pane resets to when it binds to this backend.
    fn default_root(&self) -> String;
    /// Enumerate one directory. Fails with [`FsError::Access`].
    async fn list(&self, path: &str) -> Result<Vec<FileEntry>, FsError>;
    /// Recursive size in bytes. Best-effort: any failure reports 0.
    async fn stat_directory_size(&self, path: &str) -> u64;
    /// Whole-file text content. Fails with [`FsError::Read`].
    async fn read_file(&self, path: &str) -> Result<String, FsError>;
    async fn write_file(&self, path: &str, content: &str) -> Result<(), FsError>;
    /// Directories are removed recursively and forcibly.
    async fn delete(&self, path: &str, is_directory: bool) -> Result<(), FsError>;
    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), FsError>;
    /// Recursive copy within this backend.
    async fn copy_same_backend(&self, source: &str, dest: &str) -> Result<(), FsError>;
}
