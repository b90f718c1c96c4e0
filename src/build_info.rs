//! Compile-time build metadata exposed to CLI surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("DROIDPANE_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("DROIDPANE_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `droidpane --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("DROIDPANE_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("DROIDPANE_BUILD_TIMESTAMP")
);

/// Version block printed by `droidpane --version` (after the binary name).
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("DROIDPANE_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("DROIDPANE_BUILD_TIMESTAMP")
);
