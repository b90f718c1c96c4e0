//! Process and shell execution helpers shared by the bridge and local gateway.

use crate::error::ExecError;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Structured process output for shell-style commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a command line through the local POSIX shell.
pub async fn run_sh_process(command: &str) -> Result<ExecOutput, ExecError> {
    run_process("sh", &["-c".into(), command.into()]).await
}

/// Spawn and wait for a process.
pub async fn run_process(program: &str, args: &[String]) -> Result<ExecOutput, ExecError> {
    debug!(program, ?args, "spawning process");
    let mut cmd = Command::new(program);
    // A timed-out future is dropped; the child must not outlive it.
    cmd.kill_on_drop(true);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = cmd
        .spawn()
        .map_err(|e| ExecError::Spawn(format!("{program}: {e}")))?;
    let output = child
        .wait_with_output()
        .await
        .map_err(|e| ExecError::Spawn(format!("{program}: {e}")))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Fail with [`ExecError::TimedOut`] when `fut` does not finish inside `limit`.
pub async fn run_with_timeout<T>(
    fut: impl std::future::Future<Output = Result<T, ExecError>>,
    limit: Duration,
    timeout_context: &str,
) -> Result<T, ExecError> {
    match timeout(limit, fut).await {
        Ok(out) => out,
        Err(_) => Err(ExecError::TimedOut(format!(
            "{timeout_context} after {}",
            format_duration(limit)
        ))),
    }
}

/// Human-oriented duration formatting used in error messages.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    if secs == 0 {
        return format!("{millis}ms");
    }
    if millis == 0 {
        if secs % 3600 == 0 {
            return format!("{}h", secs / 3600);
        }
        if secs % 60 == 0 {
            return format!("{}m", secs / 60);
        }
        return format!("{secs}s");
    }
    format!("{secs}.{millis:03}s")
}

/// Convert non-zero command status into a contextual error.
pub fn ensure_success(output: ExecOutput, context: &str) -> Result<ExecOutput, ExecError> {
    if output.success() {
        return Ok(output);
    }

    let mut details = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };
    if details.is_empty() {
        details = format!("command exited with {}", output.exit_code);
    }

    Err(ExecError::Failed(format!("{context}: {details}")))
}
