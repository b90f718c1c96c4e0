//! droidpane: the core of a two-pane file manager whose panes browse either
//! the local filesystem or the storage of an adb-attached device.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use droidpane::bridge::AdbBridge;
//! use droidpane::config::load_config;
//! use droidpane::session::{Session, Side};
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let bridge = Arc::new(AdbBridge::from_config(&config.bridge));
//! let mut session = Session::new(&config, bridge);
//! session.bind_device(Side::Right, "emulator-5554").await.unwrap();
//! for entry in session.reload(Side::Right).await.unwrap() {
//!     println!("{}", entry.name);
//! }
//! # }
//! ```

pub mod bridge;
pub mod build_info;
pub mod config;
pub mod error;
pub mod fs;
pub mod pane;
pub mod render;
pub mod session;
#[cfg(test)]
pub mod testsupport;
pub mod transfer;
