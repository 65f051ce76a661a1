//! `dlmon watch` – fixed-length sampling session.

use anyhow::Result;
use chrono::Local;
use dlmon_core::config::DlmonConfig;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use super::open_monitor;
use crate::cli::report;

pub fn run_watch(
    cfg: &DlmonConfig,
    steam_root: Option<PathBuf>,
    samples: u32,
    interval_secs: u64,
) -> Result<()> {
    let mut monitor = open_monitor(cfg, steam_root)?;
    tracing::info!(samples, interval_secs, "watch session started");

    for i in 0..samples {
        let sample = monitor.tick(Local::now())?;
        println!("{}", report::format_line(&sample));

        if i + 1 < samples {
            thread::sleep(Duration::from_secs(interval_secs));
        }
    }

    tracing::info!("watch session finished");
    Ok(())
}
