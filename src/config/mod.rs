//! Configuration loading from TOML files and environment variables.
//!
//! Precedence (highest wins):
//! 1. Environment variables (`DROIDPANE_ADB`, `DROIDPANE_TIMEOUT_SECS`,
//!    `DROIDPANE_LOCAL_ROOT`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./droidpane.toml in the current directory
//! 4. $XDG_CONFIG_HOME/droidpane/droidpane.toml (or ~/.config/droidpane/droidpane.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use defaults::DEFAULT_BINARY_EXTENSIONS;
pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use loader::load_config;
pub use types::{BridgeConfig, Config, GlobalConfigInitResult, PathsConfig, ViewerConfig};
