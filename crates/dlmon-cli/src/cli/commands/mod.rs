//! CLI command handlers. Each command is in its own file.

mod locate;
mod status;
mod watch;

pub use locate::run_locate;
pub use status::run_status;
pub use watch::run_watch;

use anyhow::Result;
use dlmon_core::config::DlmonConfig;
use dlmon_core::locator::{self, LocateError, LocateOptions};
use dlmon_core::monitor::Monitor;
use std::path::PathBuf;

/// Locate Steam and build a monitor. A missing installation is not fatal:
/// the monitor then reports idle on every tick.
fn open_monitor(cfg: &DlmonConfig, steam_root: Option<PathBuf>) -> Result<Monitor> {
    let opts = LocateOptions::from_env(steam_root, cfg.steam_root.clone());
    let library = match locator::locate(&opts) {
        Ok(library) => {
            println!("[INFO] Steam root: {}", library.root().display());
            Some(library)
        }
        Err(LocateError::NotFound) => {
            tracing::warn!("no Steam installation found");
            println!("[INFO] {}", LocateError::NotFound);
            None
        }
        Err(e) => return Err(e.into()),
    };
    Monitor::new(library, cfg)
}
