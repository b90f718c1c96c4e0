//! Session: the two panes, the editing state, and the operations the
//! presentation layer invokes on them.
//!
//! Operations that act on "the entry" use the active pane's selection.
//! Transfers go from the active pane into the other pane's directory.

pub mod viewer;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::bridge::{Device, RemoteShellBridge};
use crate::config::Config;
use crate::error::FsError;
use crate::fs::entry::is_valid_entry_name;
use crate::fs::temp::temp_name;
use crate::fs::{paths, Backend, BackendBinding, FileEntry, LocalGateway, RemoteGateway};
use crate::pane::Pane;
use crate::transfer::{
    destination_path, TransferDest, TransferOrchestrator, TransferSettings, TransferSource,
};

pub use viewer::Viewer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Pane navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Up,
    Into(String),
    IntoSelection,
}

/// The file currently open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingFile {
    pub side: Side,
    pub binding: BackendBinding,
    pub path: String,
    pub name: String,
}

/// Outcome of asking to view the selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewContent {
    Text(String),
    /// Not loadable as text; hand it to [`Session::open_external`].
    Binary { name: String },
}

pub struct Session {
    left: Pane,
    right: Pane,
    active: Side,
    editing: Option<EditingFile>,
    bridge: Arc<dyn RemoteShellBridge>,
    local: LocalGateway,
    orchestrator: TransferOrchestrator,
    viewer: Viewer,
    local_root: String,
    remote_root: String,
    local_temp_dir: PathBuf,
}

impl Session {
    /// Both panes start on the local backend at the configured local root.
    pub fn new(config: &Config, bridge: Arc<dyn RemoteShellBridge>) -> Self {
        let local = LocalGateway::new(config.paths.local_root.clone());
        let local_root = local.default_root();
        let orchestrator = TransferOrchestrator::new(
            bridge.clone(),
            local.clone(),
            TransferSettings::from_config(config),
        );
        Self {
            left: Pane::new(BackendBinding::Local, &local_root),
            right: Pane::new(BackendBinding::Local, &local_root),
            active: Side::Left,
            editing: None,
            bridge,
            local,
            orchestrator,
            viewer: Viewer::from_config(&config.viewer),
            local_root,
            remote_root: paths::normalize(&config.paths.remote_root),
            local_temp_dir: config.paths.local_temp_dir.clone(),
        }
    }

    pub fn pane(&self, side: Side) -> &Pane {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut Pane {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    pub fn set_active(&mut self, side: Side) {
        self.active = side;
    }

    pub fn editing(&self) -> Option<&EditingFile> {
        self.editing.as_ref()
    }

    pub async fn list_devices(&self) -> Vec<Device> {
        self.bridge.list_devices().await
    }

    fn backend(&self, binding: &BackendBinding) -> Box<dyn Backend> {
        match binding {
            BackendBinding::Local => Box::new(self.local.clone()),
            BackendBinding::Remote { serial } => Box::new(RemoteGateway::new(
                self.bridge.clone(),
                Some(serial.clone()),
                self.remote_root.clone(),
                self.local_temp_dir.clone(),
            )),
        }
    }

    // -----------------------------------------------------------------------
    // Binding and navigation
    // -----------------------------------------------------------------------

    pub fn bind_local(&mut self, side: Side) {
        let root = self.local_root.clone();
        self.pane_mut(side).switch_backend(BackendBinding::Local, &root);
    }

    /// Bind `side` to a device. Only devices currently reported Ready qualify.
    pub async fn bind_device(&mut self, side: Side, serial: &str) -> Result<(), FsError> {
        let devices = self.list_devices().await;
        if !devices.iter().any(|d| d.serial == serial && d.is_ready()) {
            return Err(FsError::DeviceNotReady(serial.to_string()));
        }
        let root = self.remote_root.clone();
        self.pane_mut(side)
            .switch_backend(BackendBinding::remote(serial), &root);
        info!(?side, serial, "pane bound to device");
        Ok(())
    }

    /// Point `side` at an absolute directory on its current backend.
    pub fn set_path(&mut self, side: Side, path: &str) {
        let binding = self.pane(side).binding().clone();
        self.pane_mut(side).switch_backend(binding, path);
    }

    /// Bind `side` to `binding`, move it to `dir`, and list it.
    pub async fn show(
        &mut self,
        side: Side,
        binding: &BackendBinding,
        dir: &str,
    ) -> Result<&[FileEntry], FsError> {
        match binding {
            BackendBinding::Local => self.bind_local(side),
            BackendBinding::Remote { serial } => self.bind_device(side, serial).await?,
        }
        self.set_path(side, dir);
        self.reload(side).await
    }

    /// Show the parent of `path` on `side`, make it active, and select the leaf.
    pub async fn focus(
        &mut self,
        side: Side,
        binding: &BackendBinding,
        path: &str,
    ) -> Result<FileEntry, FsError> {
        let leaf = paths::leaf(path).to_string();
        if leaf.is_empty() {
            return Err(FsError::NothingSelected);
        }
        self.show(side, binding, &paths::parent(path)).await?;
        self.set_active(side);
        self.select(side, &leaf)
    }

    /// Re-list the pane's directory. Clears the selection.
    pub async fn reload(&mut self, side: Side) -> Result<&[FileEntry], FsError> {
        let ticket = self.pane_mut(side).begin_reload();
        let entries = self.backend(&ticket.binding).list(&ticket.path).await?;
        if !self.pane_mut(side).finish_reload(&ticket, entries) {
            debug!(?side, path = %ticket.path, "discarded stale listing");
        }
        Ok(self.pane(side).entries())
    }

    pub async fn navigate(&mut self, side: Side, nav: Navigation) -> Result<(), FsError> {
        match nav {
            Navigation::Up => self.pane_mut(side).navigate_up(),
            Navigation::Into(name) => self.pane_mut(side).navigate_into(Some(&name))?,
            Navigation::IntoSelection => self.pane_mut(side).navigate_into(None)?,
        }
        self.reload(side).await.map(|_| ())
    }

    pub fn select(&mut self, side: Side, name: &str) -> Result<FileEntry, FsError> {
        self.pane_mut(side).select(name).cloned()
    }

    /// Rebind panes whose device is gone or no longer Ready to the local root.
    /// Returns the sides that changed.
    pub fn handle_device_list(&mut self, devices: &[Device]) -> Vec<Side> {
        let mut rebound = Vec::new();
        for side in [Side::Left, Side::Right] {
            let Some(serial) = self.pane(side).binding().serial() else {
                continue;
            };
            let still_ready = devices.iter().any(|d| d.serial == serial && d.is_ready());
            if !still_ready {
                info!(?side, serial, "bound device disappeared; switching pane to local");
                self.bind_local(side);
                rebound.push(side);
            }
        }
        rebound
    }

    // -----------------------------------------------------------------------
    // Operations on the active selection
    // -----------------------------------------------------------------------

    fn active_selection(&self) -> Result<(BackendBinding, FileEntry, String), FsError> {
        let pane = self.pane(self.active);
        let entry = pane.selection().entry().ok_or(FsError::NothingSelected)?;
        let path = pane.selection().path().ok_or(FsError::NothingSelected)?;
        Ok((pane.binding().clone(), entry.clone(), path.to_string()))
    }

    /// Copy the active selection into the other pane's directory.
    pub async fn transfer(&mut self) -> Result<(), FsError> {
        let (binding, entry, path) = self.active_selection()?;
        let dest_side = self.active.other();
        let dest_pane = self.pane(dest_side);
        let dest = TransferDest {
            binding: dest_pane.binding().clone(),
            path: destination_path(dest_pane.path().as_str(), &entry.name),
        };
        let source = TransferSource {
            binding,
            path,
            is_directory: entry.is_directory,
        };
        self.orchestrator.transfer(source, dest).await?;
        self.reload(dest_side).await.map(|_| ())
    }

    pub async fn delete(&mut self) -> Result<(), FsError> {
        let (binding, entry, path) = self.active_selection()?;
        self.backend(&binding)
            .delete(&path, entry.is_directory)
            .await?;
        self.reload(self.active).await.map(|_| ())
    }

    /// Rename the active selection within its directory. A blank or
    /// unchanged name does nothing.
    pub async fn rename(&mut self, new_name: &str) -> Result<(), FsError> {
        let (binding, entry, path) = self.active_selection()?;
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == entry.name {
            return Ok(());
        }
        if !is_valid_entry_name(new_name) {
            return Err(FsError::Rename(format!("invalid name `{new_name}`")));
        }
        let new_path = paths::sibling(&path, new_name);
        self.backend(&binding).rename(&path, &new_path).await?;
        self.reload(self.active).await.map(|_| ())
    }

    /// Recursive size of the selected directory, or the listed size of a file.
    pub async fn compute_directory_size(&self) -> Result<u64, FsError> {
        let (binding, entry, path) = self.active_selection()?;
        if !entry.is_directory {
            return Ok(entry.size);
        }
        Ok(self.backend(&binding).stat_directory_size(&path).await)
    }

    /// Load the selected file as text. With `edit`, it becomes the editing file.
    pub async fn read_for_view(&mut self, edit: bool) -> Result<ViewContent, FsError> {
        let (binding, entry, path) = self.active_selection()?;
        if entry.is_directory {
            return Err(FsError::Read(format!("{path}: is a directory")));
        }
        if self.viewer.is_binary(&entry) {
            return Ok(ViewContent::Binary { name: entry.name });
        }
        let text = self.backend(&binding).read_file(&path).await?;
        if edit {
            self.editing = Some(EditingFile {
                side: self.active,
                binding,
                path,
                name: entry.name,
            });
        }
        Ok(ViewContent::Text(text))
    }

    /// Save editor content back to the editing file.
    pub async fn write_from_edit(&mut self, content: &str) -> Result<(), FsError> {
        let editing = self.editing.clone().ok_or(FsError::NothingSelected)?;
        self.backend(&editing.binding)
            .write_file(&editing.path, content)
            .await?;
        info!(path = %editing.path, "saved edit");
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    /// Open the selected file with the system viewer. Remote files are pulled
    /// to a fresh local temp path first; that copy is left for the viewer.
    pub async fn open_external(&self) -> Result<PathBuf, FsError> {
        let (binding, entry, path) = self.active_selection()?;
        let local_path = match &binding {
            BackendBinding::Local => PathBuf::from(&path),
            BackendBinding::Remote { serial } => {
                let ext = entry.extension().unwrap_or_default();
                let local = self.local_temp_dir.join(temp_name("temp_view", &ext));
                self.bridge
                    .pull_file(serial, &path, &local)
                    .await
                    .map_err(|e| FsError::Open(format!("{path}: {e}")))?;
                local
            }
        };
        self.viewer.open(&local_path).await?;
        Ok(local_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::DeviceState;
    use crate::testsupport::{RecordingBridge, TestTempDir};
    use crate::transfer::TransferStep;

    struct Fixture {
        dir: TestTempDir,
        bridge: Arc<RecordingBridge>,
        session: Session,
    }

    fn fixture(prefix: &str, bridge: RecordingBridge) -> Fixture {
        let dir = TestTempDir::new(prefix);
        for sub in ["local", "device", "host-tmp", "device-tmp"] {
            std::fs::create_dir_all(dir.child(sub)).unwrap();
        }
        let mut config = Config::default();
        config.paths.local_root = dir.child("local").display().to_string();
        config.paths.remote_root = dir.child("device").display().to_string();
        config.paths.local_temp_dir = dir.child("host-tmp");
        config.bridge.remote_temp_dir = dir.child("device-tmp").display().to_string();
        config.viewer.open_command = "true".into();
        let bridge = Arc::new(bridge.with_devices(&[
            ("emu", DeviceState::Ready),
            ("locked", DeviceState::Unauthorized),
        ]));
        let session = Session::new(&config, bridge.clone());
        Fixture {
            dir,
            bridge,
            session,
        }
    }

    #[tokio::test]
    async fn panes_start_local_at_local_root() {
        let fx = fixture("session-defaults", RecordingBridge::new());
        for side in [Side::Left, Side::Right] {
            assert_eq!(fx.session.pane(side).binding(), &BackendBinding::Local);
            assert_eq!(
                fx.session.pane(side).path().as_str(),
                fx.dir.child("local").display().to_string()
            );
        }
    }

    #[tokio::test]
    async fn only_ready_devices_can_be_bound() {
        let mut fx = fixture("session-bind", RecordingBridge::new());
        assert_eq!(
            fx.session.bind_device(Side::Right, "locked").await.unwrap_err(),
            FsError::DeviceNotReady("locked".into())
        );
        assert_eq!(
            fx.session.bind_device(Side::Right, "ghost").await.unwrap_err(),
            FsError::DeviceNotReady("ghost".into())
        );
        fx.session.bind_device(Side::Right, "emu").await.unwrap();
        assert_eq!(
            fx.session.pane(Side::Right).binding(),
            &BackendBinding::remote("emu")
        );
        assert_eq!(
            fx.session.pane(Side::Right).path().as_str(),
            fx.dir.child("device").display().to_string()
        );
    }

    #[tokio::test]
    async fn transfer_copies_selection_into_other_pane_and_reloads_it() {
        let mut fx = fixture(
            "session-transfer",
            RecordingBridge::new().with_canned_stdout(
                "ls -l",
                "-rw-rw---- 1 root sdcard_rw 2 2024-01-20 12:00 notes.txt\n",
            ),
        );
        fx.dir.write_text("local/notes.txt", "hi");
        fx.session.bind_device(Side::Right, "emu").await.unwrap();
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "notes.txt").unwrap();

        fx.session.transfer().await.unwrap();

        assert!(fx.dir.child("device/notes.txt").exists());
        assert_eq!(fx.session.pane(Side::Right).entries()[0].name, "notes.txt");
        assert!(fx.session.pane(Side::Left).selection().entry().is_some());
    }

    #[tokio::test]
    async fn transfer_between_panes_on_same_directory_keeps_the_file() {
        let mut fx = fixture("session-self-copy", RecordingBridge::new());
        fx.dir.write_text("local/a.txt", "precious");
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "a.txt").unwrap();

        let err = fx.session.transfer().await.unwrap_err();

        assert!(
            matches!(err, FsError::Transfer { step: TransferStep::Copy, .. }),
            "got: {err:?}"
        );
        assert_eq!(
            std::fs::read_to_string(fx.dir.child("local/a.txt")).unwrap(),
            "precious"
        );
    }

    #[tokio::test]
    async fn operations_without_selection_fail() {
        let mut fx = fixture("session-nosel", RecordingBridge::new());
        assert_eq!(fx.session.transfer().await.unwrap_err(), FsError::NothingSelected);
        assert_eq!(fx.session.delete().await.unwrap_err(), FsError::NothingSelected);
        assert_eq!(
            fx.session.write_from_edit("x").await.unwrap_err(),
            FsError::NothingSelected
        );
        assert!(fx.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn rename_builds_sibling_path_and_ignores_blank_names() {
        let mut fx = fixture("session-rename", RecordingBridge::new());
        fx.dir.write_text("local/a.txt", "x");
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "a.txt").unwrap();

        fx.session.rename("   ").await.unwrap();
        fx.session.rename("a.txt").await.unwrap();
        assert!(fx.dir.child("local/a.txt").exists());

        fx.session.rename(" b.txt ").await.unwrap();
        assert!(fx.dir.child("local/b.txt").exists());
        assert!(fx.session.pane(Side::Left).selection().is_empty());
        let names: Vec<_> = fx
            .session
            .pane(Side::Left)
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["b.txt"]);
    }

    #[tokio::test]
    async fn rename_rejects_path_separators() {
        let mut fx = fixture("session-rename-bad", RecordingBridge::new());
        fx.dir.write_text("local/a.txt", "x");
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "a.txt").unwrap();
        assert!(matches!(
            fx.session.rename("../evil").await,
            Err(FsError::Rename(_))
        ));
    }

    fn moves(bridge: &RecordingBridge) -> Vec<String> {
        bridge
            .shell_commands()
            .into_iter()
            .filter(|c| c.starts_with("mv "))
            .collect()
    }

    #[tokio::test]
    async fn rename_on_device_pane_moves_to_sibling() {
        let mut fx = fixture("session-rename-remote", RecordingBridge::new().with_canned_stdout(
            "ls -l",
            "-rw-rw---- 1 root sdcard_rw 1 2024-01-20 12:00 a.txt\n",
        ));
        let old = fx.dir.write_text("device/a.txt", "x").display().to_string();
        let new = fx.dir.child("device/b.txt").display().to_string();
        fx.session.bind_device(Side::Right, "emu").await.unwrap();
        fx.session.set_active(Side::Right);
        fx.session.reload(Side::Right).await.unwrap();
        fx.session.select(Side::Right, "a.txt").unwrap();

        fx.session.rename("b.txt").await.unwrap();

        assert_eq!(moves(&fx.bridge), vec![format!("mv \"{old}\" \"{new}\"")]);
        assert!(fx.dir.child("device/b.txt").exists());
        assert!(!fx.dir.child("device/a.txt").exists());
    }

    #[tokio::test]
    async fn rename_at_device_root_stays_at_root() {
        let mut fx = fixture(
            "session-rename-root",
            RecordingBridge::new()
                .with_canned_stdout("ls -l", "-rw-rw---- 1 root root 1 2024-01-20 12:00 a.txt\n")
                .with_canned_stdout("mv ", ""),
        );
        fx.session.bind_device(Side::Right, "emu").await.unwrap();
        fx.session.set_path(Side::Right, "/");
        fx.session.set_active(Side::Right);
        fx.session.reload(Side::Right).await.unwrap();
        fx.session.select(Side::Right, "a.txt").unwrap();

        fx.session.rename("b.txt").await.unwrap();

        assert_eq!(moves(&fx.bridge), vec!["mv \"/a.txt\" \"/b.txt\"".to_string()]);
    }

    #[tokio::test]
    async fn edit_round_trip_on_remote_pane() {
        let mut fx = fixture("session-edit", RecordingBridge::new().with_canned_stdout(
            "ls -l",
            "-rw-rw---- 1 root sdcard_rw 5 2024-01-20 12:00 todo.txt\n",
        ));
        fx.dir.write_text("device/todo.txt", "draft");
        fx.session.bind_device(Side::Right, "emu").await.unwrap();
        fx.session.set_active(Side::Right);
        fx.session.reload(Side::Right).await.unwrap();
        fx.session.select(Side::Right, "todo.txt").unwrap();

        let content = fx.session.read_for_view(true).await.unwrap();
        assert_eq!(content, ViewContent::Text("draft".into()));
        assert_eq!(fx.session.editing().map(|e| e.name.as_str()), Some("todo.txt"));

        fx.session.write_from_edit("final").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(fx.dir.child("device/todo.txt")).unwrap(),
            "final"
        );
        fx.session.close_editor();
        assert!(fx.session.editing().is_none());
        assert_eq!(std::fs::read_dir(fx.dir.child("host-tmp")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn binary_files_are_not_read_as_text() {
        let mut fx = fixture("session-binary", RecordingBridge::new());
        fx.dir.write_text("local/photo.JPG", "\u{0}");
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "photo.JPG").unwrap();
        let content = fx.session.read_for_view(false).await.unwrap();
        assert_eq!(
            content,
            ViewContent::Binary {
                name: "photo.JPG".into()
            }
        );
        let opened = fx.session.open_external().await.unwrap();
        assert_eq!(opened, fx.dir.child("local/photo.JPG"));
    }

    #[tokio::test]
    async fn remote_open_pulls_to_view_temp_with_extension() {
        let mut fx = fixture("session-open-remote", RecordingBridge::new().with_canned_stdout(
            "ls -l",
            "-rw-rw---- 1 root sdcard_rw 3 2024-01-20 12:00 scan.pdf\n",
        ));
        fx.dir.write_text("device/scan.pdf", "pdf");
        fx.session.bind_device(Side::Left, "emu").await.unwrap();
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "scan.pdf").unwrap();

        let opened = fx.session.open_external().await.unwrap();

        let name = opened.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("temp_view_"), "got: {name}");
        assert!(name.ends_with(".pdf"), "got: {name}");
        assert_eq!(std::fs::read_to_string(&opened).unwrap(), "pdf");
    }

    #[tokio::test]
    async fn directory_size_for_files_uses_listing_size() {
        let mut fx = fixture("session-size", RecordingBridge::new());
        fx.dir.write_text("local/a.bin", "1234");
        fx.dir.write_text("local/dir/b", "12");
        fx.session.reload(Side::Left).await.unwrap();
        fx.session.select(Side::Left, "a.bin").unwrap();
        assert_eq!(fx.session.compute_directory_size().await.unwrap(), 4);
        fx.session.select(Side::Left, "dir").unwrap();
        assert_eq!(fx.session.compute_directory_size().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn vanished_device_rebinds_pane_to_local() {
        let mut fx = fixture("session-vanish", RecordingBridge::new());
        fx.session.bind_device(Side::Right, "emu").await.unwrap();

        let still_there = [Device {
            serial: "emu".into(),
            state: DeviceState::Ready,
        }];
        assert!(fx.session.handle_device_list(&still_there).is_empty());

        let rebound = fx.session.handle_device_list(&[]);
        assert_eq!(rebound, vec![Side::Right]);
        assert_eq!(fx.session.pane(Side::Right).binding(), &BackendBinding::Local);
        assert!(fx.session.handle_device_list(&[]).is_empty());
    }

    #[tokio::test]
    async fn navigation_reloads_listing() {
        let mut fx = fixture("session-nav", RecordingBridge::new());
        fx.dir.write_text("local/sub/inner.txt", "x");
        fx.session.navigate(Side::Left, Navigation::Into("sub".into())).await.unwrap();
        assert_eq!(fx.session.pane(Side::Left).entries()[0].name, "inner.txt");
        fx.session.navigate(Side::Left, Navigation::Up).await.unwrap();
        assert_eq!(fx.session.pane(Side::Left).entries()[0].name, "sub");
    }

    #[tokio::test]
    async fn focus_selects_leaf_in_parent_listing() {
        let mut fx = fixture("session-focus", RecordingBridge::new());
        let file = fx.dir.write_text("local/sub/x.txt", "x");
        let entry = fx
            .session
            .focus(Side::Right, &BackendBinding::Local, &file.display().to_string())
            .await
            .unwrap();
        assert_eq!(entry.name, "x.txt");
        assert_eq!(fx.session.active_side(), Side::Right);
        assert_eq!(
            fx.session.pane(Side::Right).selection().path(),
            Some(file.display().to_string().as_str())
        );
        assert_eq!(
            fx.session
                .focus(Side::Left, &BackendBinding::Local, "/")
                .await
                .unwrap_err(),
            FsError::NothingSelected
        );
    }

    #[tokio::test]
    async fn show_rejects_unready_device_without_moving_pane() {
        let mut fx = fixture("session-show", RecordingBridge::new());
        let before = fx.session.pane(Side::Left).path().clone();
        let err = fx
            .session
            .show(Side::Left, &BackendBinding::remote("locked"), "/sdcard")
            .await
            .unwrap_err();
        assert_eq!(err, FsError::DeviceNotReady("locked".into()));
        assert_eq!(fx.session.pane(Side::Left).path(), &before);
    }
}
