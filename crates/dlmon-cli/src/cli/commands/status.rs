//! `dlmon status` – one sample, printed once.

use anyhow::Result;
use chrono::Local;
use dlmon_core::config::DlmonConfig;
use std::path::PathBuf;

use super::open_monitor;
use crate::cli::report;

pub fn run_status(cfg: &DlmonConfig, steam_root: Option<PathBuf>) -> Result<()> {
    let mut monitor = open_monitor(cfg, steam_root)?;
    let sample = monitor.tick(Local::now())?;
    println!("{}", report::format_line(&sample));
    Ok(())
}
