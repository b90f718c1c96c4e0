//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::fs::paths;

use super::env::apply_runtime_env_overrides;
use super::init::config_root_dir;
use super::sources::read_config_text_with_sources;
use super::Config;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    debug!(?source, "config source resolved");
    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    normalize_and_validate(&mut config)?;
    Ok(config)
}

fn normalize_and_validate(config: &mut Config) -> Result<(), ConfigError> {
    if config.bridge.program.trim().is_empty() {
        return Err(ConfigError::Invalid("bridge.program must not be empty".into()));
    }
    for (name, value) in [
        ("bridge.command_timeout_secs", config.bridge.command_timeout_secs),
        ("bridge.transfer_timeout_secs", config.bridge.transfer_timeout_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
        }
    }
    for (name, value) in [
        ("paths.local_root", &config.paths.local_root),
        ("paths.remote_root", &config.paths.remote_root),
        ("bridge.remote_temp_dir", &config.bridge.remote_temp_dir),
    ] {
        if !value.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "{name} must be an absolute path, got `{value}`"
            )));
        }
    }
    if !config.paths.local_temp_dir.is_absolute() {
        return Err(ConfigError::Invalid(format!(
            "paths.local_temp_dir must be an absolute path, got `{}`",
            config.paths.local_temp_dir.display()
        )));
    }
    config.paths.local_root = paths::normalize(&config.paths.local_root);
    config.paths.remote_root = paths::normalize(&config.paths.remote_root);
    config.bridge.remote_temp_dir = paths::normalize(&config.bridge.remote_temp_dir);

    config.viewer.binary_extensions = config
        .viewer
        .binary_extensions
        .iter()
        .map(|ext| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| if ext.starts_with('.') { ext } else { format!(".{ext}") })
        .collect();
    Ok(())
}
