//! Default configuration constants.

use std::path::PathBuf;

/// Embedded default `droidpane.toml` written by `droidpane init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/droidpane.toml");
pub(super) const DEFAULT_BRIDGE_PROGRAM: &str = "adb";
pub(super) const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;
pub(super) const DEFAULT_TRANSFER_TIMEOUT_SECS: u64 = 1800;
/// Device-writable staging directory for pushed archives.
pub(super) const DEFAULT_REMOTE_TEMP_DIR: &str = "/data/local/tmp";
pub(super) const DEFAULT_REMOTE_ROOT: &str = "/sdcard/";

/// Extensions the viewer refuses to load as text.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".zip", ".tar", ".gz", ".apk", ".exe",
    ".bin", ".iso", ".mp4", ".mp3", ".wav", ".dmg", ".doc", ".docx", ".xls", ".xlsx", ".ppt",
    ".pptx",
];

pub(super) fn default_local_root() -> String {
    dirs::home_dir()
        .map(|home| home.display().to_string())
        .unwrap_or_else(|| "/".to_string())
}

pub(super) fn default_local_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

pub(super) fn default_open_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}
