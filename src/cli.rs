//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use droidpane::build_info;
use droidpane::fs::{paths, BackendBinding};

/// Two-pane file manager core for a local machine and adb-attached devices.
#[derive(Debug, Parser)]
#[command(
    name = "droidpane",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Path to config file (default: ./droidpane.toml or ~/.config/droidpane/droidpane.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Log every spawned command at debug level.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config to ~/.config/droidpane/droidpane.toml.
    Init {
        /// Overwrite an existing file after backing it up.
        #[arg(long)]
        force: bool,
    },
    /// List attached devices and their states.
    Devices {
        #[arg(long)]
        json: bool,
    },
    /// Print the device list every time it changes.
    Watch,
    /// List a directory.
    Ls {
        #[arg(value_parser = parse_location)]
        location: Location,
        #[arg(long)]
        json: bool,
    },
    /// Recursive size of a directory (or size of a file).
    Du {
        #[arg(value_parser = parse_location)]
        location: Location,
    },
    /// Print a text file.
    Cat {
        #[arg(value_parser = parse_location)]
        location: Location,
    },
    /// Replace a text file's content with the content of a local file.
    Edit {
        #[arg(value_parser = parse_location)]
        location: Location,
        #[arg(long = "from-file")]
        from_file: String,
    },
    /// Delete a file or directory tree.
    Rm {
        #[arg(value_parser = parse_location)]
        location: Location,
    },
    /// Rename within the same directory.
    Mv {
        #[arg(value_parser = parse_location)]
        location: Location,
        new_name: String,
    },
    /// Copy into a directory, possibly across backends.
    Cp {
        #[arg(value_parser = parse_location)]
        source: Location,
        #[arg(value_parser = parse_location)]
        dest_dir: Location,
    },
    /// Open a file with the system viewer.
    Open {
        #[arg(value_parser = parse_location)]
        location: Location,
    },
}

/// A backend plus an absolute path on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub binding: BackendBinding,
    pub path: String,
}

impl Location {
    pub fn parent(&self) -> String {
        paths::parent(&self.path)
    }

    pub fn leaf(&self) -> &str {
        paths::leaf(&self.path)
    }
}

/// `/abs/path` is local; `SERIAL:/abs/path` is on that device.
pub fn parse_location(raw: &str) -> Result<Location, String> {
    if raw.starts_with('/') {
        return Ok(Location {
            binding: BackendBinding::Local,
            path: paths::normalize(raw),
        });
    }
    match raw.split_once(':') {
        Some((serial, path)) if !serial.is_empty() && path.starts_with('/') => Ok(Location {
            binding: BackendBinding::remote(serial),
            path: paths::normalize(path),
        }),
        _ => Err(format!(
            "`{raw}` is not an absolute local path or SERIAL:/path"
        )),
    }
}
