//! Text/binary classification and the system "open with" action.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::bridge::process::{ensure_success, run_process, run_with_timeout};
use crate::config::ViewerConfig;
use crate::error::FsError;
use crate::fs::FileEntry;

const OPEN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Viewer {
    binary_extensions: Vec<String>,
    open_command: String,
}

impl Viewer {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            binary_extensions: config.binary_extensions.clone(),
            open_command: config.open_command.clone(),
        }
    }

    /// True when the entry must be handed to the system viewer instead of
    /// being read as text.
    pub fn is_binary(&self, entry: &FileEntry) -> bool {
        entry
            .extension()
            .is_some_and(|ext| self.binary_extensions.iter().any(|b| *b == ext))
    }

    /// Launch the configured opener on a local file.
    pub async fn open(&self, path: &Path) -> Result<(), FsError> {
        let target = path.display().to_string();
        info!(command = %self.open_command, path = %target, "opening with system viewer");
        let context = format!("{} {target}", self.open_command);
        let output = run_with_timeout(
            run_process(&self.open_command, &[target.clone()]),
            OPEN_TIMEOUT,
            &context,
        )
        .await
        .map_err(|e| FsError::Open(e.to_string()))?;
        ensure_success(output, &context)
            .map(|_| ())
            .map_err(|e| FsError::Open(e.to_string()))
    }
}
