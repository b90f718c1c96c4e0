//! Transfer orchestration between backend bindings.
//!
//! Steps of one transfer run strictly in sequence. The first failing step
//! aborts the plan, nothing is retried, and completed steps are not rolled
//! back. Temp artifacts registered by the plan are released on every exit
//! path before the result is returned.

pub mod plan;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::bridge::process::{ensure_success, run_sh_process, run_with_timeout};
use crate::bridge::{RemoteCommand, RemoteShellBridge};
use crate::config::Config;
use crate::error::FsError;
use crate::fs::escape::{escape_for_local_shell, escape_for_remote_shell};
use crate::fs::{paths, Backend, LocalGateway, RemoteGateway};

pub use plan::{
    destination_path, TransferDest, TransferPlan, TransferSource, TransferStep, TransferStrategy,
};

/// Locations and limits used by transfers.
#[derive(Debug, Clone)]
pub struct TransferSettings {
    pub local_temp_dir: PathBuf,
    pub remote_temp_dir: String,
    pub remote_root: String,
    pub package_timeout: Duration,
}

impl TransferSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            local_temp_dir: config.paths.local_temp_dir.clone(),
            remote_temp_dir: config.bridge.remote_temp_dir.clone(),
            remote_root: config.paths.remote_root.clone(),
            package_timeout: Duration::from_secs(config.bridge.transfer_timeout_secs),
        }
    }
}

/// Runs [`TransferPlan`]s against the local disk and the bridge.
#[derive(Clone)]
pub struct TransferOrchestrator {
    bridge: Arc<dyn RemoteShellBridge>,
    local: LocalGateway,
    settings: TransferSettings,
}

impl TransferOrchestrator {
    pub fn new(bridge: Arc<dyn RemoteShellBridge>, local: LocalGateway, settings: TransferSettings) -> Self {
        Self {
            bridge,
            local,
            settings,
        }
    }

    /// Move `source` to `dest`, selecting the strategy from the binding pair.
    pub async fn transfer(&self, source: TransferSource, dest: TransferDest) -> Result<(), FsError> {
        let mut plan = TransferPlan::build(source, dest)?;
        info!(
            strategy = %plan.strategy,
            source = %plan.source.path,
            dest = %plan.dest.path,
            "transfer started"
        );
        let result = self.run(&mut plan).await;
        plan.temps.release(self.bridge.as_ref()).await;
        match &result {
            Ok(()) => info!(strategy = %plan.strategy, dest = %plan.dest.path, "transfer finished"),
            Err(e) => warn!(strategy = %plan.strategy, error = %e, "transfer failed"),
        }
        result
    }

    async fn run(&self, plan: &mut TransferPlan) -> Result<(), FsError> {
        match plan.strategy.clone() {
            plan::TransferStrategy::LocalCopy => self
                .local
                .copy_same_backend(&plan.source.path, &plan.dest.path)
                .await
                .map_err(|e| FsError::transfer(TransferStep::Copy, e)),
            plan::TransferStrategy::RemoteCopy { serial } => self
                .remote_gateway(&serial)
                .copy_same_backend(&plan.source.path, &plan.dest.path)
                .await
                .map_err(|e| FsError::transfer(TransferStep::Copy, e)),
            plan::TransferStrategy::PushFile { serial } => self
                .bridge
                .push_file(&serial, std::path::Path::new(&plan.source.path), &plan.dest.path)
                .await
                .map_err(|e| FsError::transfer(TransferStep::Push, e)),
            plan::TransferStrategy::Pull { serial } => self
                .bridge
                .pull_file(&serial, &plan.source.path, std::path::Path::new(&plan.dest.path))
                .await
                .map_err(|e| FsError::transfer(TransferStep::Pull, e)),
            plan::TransferStrategy::TarPush { serial } => self.tar_push(plan, &serial).await,
        }
    }

    /// Package with symlinks dereferenced, push, extract beside the
    /// destination, then move into place when the leaf changes.
    async fn tar_push(&self, plan: &mut TransferPlan, serial: &str) -> Result<(), FsError> {
        let source_parent = paths::parent(&plan.source.path);
        let source_leaf = paths::leaf(&plan.source.path).to_string();
        let dest_parent = paths::parent(&plan.dest.path);

        let archive = plan
            .temps
            .local_in(&self.settings.local_temp_dir, "temp_copy", ".tar");
        let package = format!(
            "cd {} && tar -chf {} {}",
            escape_for_local_shell(&source_parent),
            escape_for_local_shell(&archive.display().to_string()),
            escape_for_local_shell(&source_leaf)
        );
        debug!(command = %package, "packaging directory");
        let output = run_with_timeout(
            run_sh_process(&package),
            self.settings.package_timeout,
            "tar package",
        )
        .await
        .and_then(|out| ensure_success(out, "tar -chf"))
        .map_err(|e| FsError::transfer(TransferStep::Package, e))?;
        if !output.stderr.trim().is_empty() {
            debug!(stderr = output.stderr.trim(), "tar warnings");
        }

        let remote_archive = plan.temps.remote_in(
            serial,
            &self.settings.remote_temp_dir,
            "temp_copy",
            ".tar",
        );
        self.bridge
            .push_file(serial, &archive, &remote_archive)
            .await
            .map_err(|e| FsError::transfer(TransferStep::Push, e))?;

        // Renamed copies unpack into a fresh staging directory. An existing
        // `<dest_parent>/<source_leaf>` is left alone.
        let extract_dir = if plan.needs_rename() {
            plan.temps.remote_dir_in(serial, &dest_parent, "temp_stage")
        } else {
            dest_parent
        };
        let dir_q = escape_for_remote_shell(&extract_dir);
        let extract = RemoteCommand::script(format!(
            "mkdir -p {dir_q} && cd {dir_q} && tar -xf {}",
            escape_for_remote_shell(&remote_archive)
        ));
        self.remote_checked(serial, &extract, TransferStep::Extract)
            .await?;

        if plan.needs_rename() {
            let extracted = paths::join(&extract_dir, &source_leaf);
            let mv = RemoteCommand::exec("mv", &[], [extracted, plan.dest.path.clone()]);
            self.remote_checked(serial, &mv, TransferStep::Rename).await?;
        }
        Ok(())
    }

    async fn remote_checked(
        &self,
        serial: &str,
        command: &RemoteCommand,
        step: TransferStep,
    ) -> Result<(), FsError> {
        let output = self
            .bridge
            .run_remote_shell(serial, command)
            .await
            .map_err(|e| FsError::transfer(step, e))?;
        ensure_success(output, &command.render_remote())
            .map(|_| ())
            .map_err(|e| FsError::transfer(step, e))
    }

    fn remote_gateway(&self, serial: &str) -> RemoteGateway {
        RemoteGateway::new(
            self.bridge.clone(),
            Some(serial.to_string()),
            self.settings.remote_root.clone(),
            self.settings.local_temp_dir.clone(),
        )
    }
}
