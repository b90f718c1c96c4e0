//! Listing entry model shared by both backends.

use serde::Serialize;
use std::time::SystemTime;

/// Which storage system a pane or gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Local,
    Remote,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// A backend plus the device it is bound to, when remote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendBinding {
    Local,
    Remote { serial: String },
}

impl BackendBinding {
    pub fn remote(serial: impl Into<String>) -> Self {
        Self::Remote {
            serial: serial.into(),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Local => BackendKind::Local,
            Self::Remote { .. } => BackendKind::Remote,
        }
    }

    pub fn serial(&self) -> Option<&str> {
        match self {
            Self::Local => None,
            Self::Remote { serial } => Some(serial),
        }
    }
}

impl std::fmt::Display for BackendBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote { serial } => write!(f, "remote:{serial}"),
        }
    }
}

/// One file or directory record produced by a listing.
///
/// Entries are produced fresh on every listing and never mutated. `name` is a
/// bare leaf: never `.` or `..` and never containing `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub is_directory: bool,
    /// Byte size; 0 when unknown or for directories.
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<SystemTime>,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            size,
            modified: None,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            size: 0,
            modified: None,
        }
    }

    /// Lower-cased extension including the leading dot (`.pdf`), if any.
    pub fn extension(&self) -> Option<String> {
        let idx = self.name.rfind('.')?;
        if idx == 0 {
            return None;
        }
        Some(self.name[idx..].to_ascii_lowercase())
    }
}

/// Raw stat record gathered by the local gateway before normalization.
#[derive(Debug, Clone)]
pub struct LocalStat {
    pub name: String,
    pub is_directory: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// True when `name` is acceptable as a listing leaf.
pub(crate) fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
