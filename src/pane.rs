//! Per-pane navigation state.
//!
//! A pane is bound to exactly one backend at a time, holds a normalized
//! absolute path, the last listing, and at most one selected entry. Every
//! path change or backend switch bumps a generation counter so a listing that
//! was started before the change is ignored when it completes.

use crate::error::FsError;
use crate::fs::entry::is_valid_entry_name;
use crate::fs::{paths, BackendBinding, BackendKind, FileEntry};

/// Absolute, normalized, backend-scoped path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathState(String);

impl PathState {
    pub fn new(raw: &str) -> Self {
        Self(paths::normalize(raw))
    }

    pub fn root() -> Self {
        Self(paths::ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == paths::ROOT
    }

    pub fn child(&self, name: &str) -> Self {
        Self(paths::join(&self.0, name))
    }

    pub fn parent(&self) -> Self {
        Self(paths::parent(&self.0))
    }
}

impl std::fmt::Display for PathState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Explicitly empty, or one entry with its resolved absolute path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Entry { entry: FileEntry, path: String },
}

impl Selection {
    pub fn entry(&self) -> Option<&FileEntry> {
        match self {
            Self::Empty => None,
            Self::Entry { entry, .. } => Some(entry),
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Entry { path, .. } => Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Token identifying one listing reload of one pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    generation: u64,
    pub binding: BackendBinding,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct Pane {
    binding: BackendBinding,
    path: PathState,
    selection: Selection,
    entries: Vec<FileEntry>,
    generation: u64,
}

impl Pane {
    pub fn new(binding: BackendBinding, root: &str) -> Self {
        Self {
            binding,
            path: PathState::new(root),
            selection: Selection::Empty,
            entries: Vec::new(),
            generation: 0,
        }
    }

    pub fn binding(&self) -> &BackendBinding {
        &self.binding
    }

    pub fn kind(&self) -> BackendKind {
        self.binding.kind()
    }

    pub fn path(&self) -> &PathState {
        &self.path
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Rebind to another backend at its default root.
    pub fn switch_backend(&mut self, binding: BackendBinding, default_root: &str) {
        self.binding = binding;
        self.move_to(PathState::new(default_root));
    }

    /// Enter `name`, or the selected entry when `name` is `None`.
    pub fn navigate_into(&mut self, name: Option<&str>) -> Result<(), FsError> {
        let target = match name {
            Some(name) => {
                let known_file = self
                    .entries
                    .iter()
                    .any(|e| e.name == name && !e.is_directory);
                if !is_valid_entry_name(name) || known_file {
                    return Err(FsError::NotADirectory(name.to_string()));
                }
                name.to_string()
            }
            None => {
                let entry = self.selection.entry().ok_or(FsError::NothingSelected)?;
                if !entry.is_directory {
                    return Err(FsError::NotADirectory(entry.name.clone()));
                }
                entry.name.clone()
            }
        };
        let next = self.path.child(&target);
        self.move_to(next);
        Ok(())
    }

    /// Pop the last segment. No-op at the root.
    pub fn navigate_up(&mut self) {
        if self.path.is_root() {
            return;
        }
        let parent = self.path.parent();
        self.move_to(parent);
    }

    /// Select the entry named `name` from the current listing.
    pub fn select(&mut self, name: &str) -> Result<&FileEntry, FsError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .ok_or_else(|| FsError::Access(format!("{name}: not in listing of {}", self.path)))?;
        let path = paths::join(self.path.as_str(), &entry.name);
        self.selection = Selection::Entry { entry, path };
        match &self.selection {
            Selection::Entry { entry, .. } => Ok(entry),
            Selection::Empty => Err(FsError::NothingSelected),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Start a reload. Any reload started earlier becomes stale.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.generation += 1;
        self.selection = Selection::Empty;
        ReloadTicket {
            generation: self.generation,
            binding: self.binding.clone(),
            path: self.path.as_str().to_string(),
        }
    }

    /// Apply a finished listing. Returns `false` and changes nothing when the
    /// ticket was superseded.
    pub fn finish_reload(&mut self, ticket: &ReloadTicket, entries: Vec<FileEntry>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.entries = entries;
        self.selection = Selection::Empty;
        true
    }

    fn move_to(&mut self, path: PathState) {
        self.path = path;
        self.entries.clear();
        self.selection = Selection::Empty;
        self.generation += 1;
    }
}
