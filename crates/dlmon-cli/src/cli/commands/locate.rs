//! `dlmon locate` – print the resolved Steam installation root.

use anyhow::Result;
use dlmon_core::config::DlmonConfig;
use dlmon_core::locator::{self, LocateOptions};
use std::path::PathBuf;

pub fn run_locate(cfg: &DlmonConfig, steam_root: Option<PathBuf>) -> Result<()> {
    let opts = LocateOptions::from_env(steam_root, cfg.steam_root.clone());
    let library = locator::locate(&opts)?;
    println!("{}", library.root().display());
    Ok(())
}
