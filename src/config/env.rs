//! Environment overrides applied after file parsing.

use crate::error::ConfigError;

use super::Config;

pub(super) const ENV_BRIDGE_PROGRAM: &str = "DROIDPANE_ADB";
pub(super) const ENV_COMMAND_TIMEOUT: &str = "DROIDPANE_TIMEOUT_SECS";
pub(super) const ENV_LOCAL_ROOT: &str = "DROIDPANE_LOCAL_ROOT";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(program) = non_empty(env_lookup(ENV_BRIDGE_PROGRAM)) {
        config.bridge.program = program;
    }
    if let Some(timeout) = non_empty(env_lookup(ENV_COMMAND_TIMEOUT)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_COMMAND_TIMEOUT} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        // Zero would mean every bridge call times out immediately.
        config.bridge.command_timeout_secs = parsed.max(1);
    }
    if let Some(root) = non_empty(env_lookup(ENV_LOCAL_ROOT)) {
        config.paths.local_root = root;
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
