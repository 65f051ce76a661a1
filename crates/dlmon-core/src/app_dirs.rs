//! Per-user config and state directories for dlmon.
//!
//! Unix follows the XDG base directory spec (`xdg` crate); elsewhere the
//! platform config / local data dirs from `dirs` are used.

use anyhow::Result;
use std::path::PathBuf;

const APP_PREFIX: &str = "dlmon";

#[cfg(unix)]
pub fn config_file() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

#[cfg(not(unix))]
pub fn config_file() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config directory on this platform"))?
        .join(APP_PREFIX);
    Ok(dir.join("config.toml"))
}

/// Directory holding `dlmon.log`.
#[cfg(unix)]
pub fn state_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.get_state_home())
}

#[cfg(not(unix))]
pub fn state_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("no local data directory on this platform"))?
        .join(APP_PREFIX);
    Ok(dir)
}
