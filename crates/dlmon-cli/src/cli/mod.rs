//! CLI for the dlmon Steam download monitor.

mod commands;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dlmon_core::config;
use std::path::PathBuf;

use commands::{run_locate, run_status, run_watch};

/// Top-level CLI for dlmon.
#[derive(Debug, Parser)]
#[command(name = "dlmon")]
#[command(about = "dlmon: sample an active Steam download's speed and pause state", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sample the active download repeatedly and print one line per sample.
    Watch {
        /// Number of samples (default from config, normally 5).
        #[arg(long, value_name = "N")]
        samples: Option<u32>,
        /// Seconds between samples (default from config, normally 60).
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
        /// Steam installation root (overrides STEAM_ROOT and autodetection).
        #[arg(long, value_name = "PATH")]
        steam_root: Option<PathBuf>,
    },

    /// Take a single sample and print it.
    Status {
        /// Steam installation root (overrides STEAM_ROOT and autodetection).
        #[arg(long, value_name = "PATH")]
        steam_root: Option<PathBuf>,
    },

    /// Print the Steam installation root that would be monitored.
    Locate {
        /// Steam installation root (overrides STEAM_ROOT and autodetection).
        #[arg(long, value_name = "PATH")]
        steam_root: Option<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Watch {
                samples,
                interval,
                steam_root,
            } => {
                let samples = samples.unwrap_or(cfg.samples);
                let interval = interval.unwrap_or(cfg.interval_secs);
                run_watch(&cfg, steam_root, samples, interval)?;
            }
            CliCommand::Status { steam_root } => run_status(&cfg, steam_root)?,
            CliCommand::Locate { steam_root } => run_locate(&cfg, steam_root)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
