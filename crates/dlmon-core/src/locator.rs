//! Locate the Steam installation root on this host.
//!
//! Resolution order: explicit override (CLI flag), `STEAM_ROOT`, config
//! `steam_root`, then the platform's default install locations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::library::SteamLibrary;

pub const STEAM_ROOT_ENV: &str = "STEAM_ROOT";

#[derive(Debug, Error)]
pub enum LocateError {
    /// No Steam installation detected on this host.
    #[error("Steam installation not found; set STEAM_ROOT or pass --steam-root")]
    NotFound,
    /// The root (or its download state directory) exists but cannot be read.
    #[error("cannot read Steam directory {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the installation root may come from, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct LocateOptions {
    pub cli_override: Option<PathBuf>,
    pub env_override: Option<PathBuf>,
    pub config_root: Option<PathBuf>,
}

impl LocateOptions {
    /// Options with `STEAM_ROOT` read from the process environment.
    pub fn from_env(cli_override: Option<PathBuf>, config_root: Option<PathBuf>) -> Self {
        Self {
            cli_override,
            env_override: std::env::var_os(STEAM_ROOT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            config_root,
        }
    }
}

/// Resolve the installation root and check that it can be listed.
pub fn locate(opts: &LocateOptions) -> Result<SteamLibrary, LocateError> {
    let root = if let Some(p) = &opts.cli_override {
        // An explicit flag is never silently replaced by autodetection.
        if !p.exists() {
            return Err(LocateError::NotFound);
        }
        p.clone()
    } else {
        [&opts.env_override, &opts.config_root]
            .into_iter()
            .flatten()
            .find(|p| p.exists())
            .cloned()
            .or_else(|| default_candidates().into_iter().find(|p| p.exists()))
            .ok_or(LocateError::NotFound)?
    };

    ensure_readable(&root)?;
    tracing::debug!(root = %root.display(), "located Steam installation");
    Ok(SteamLibrary::new(root))
}

fn ensure_readable(root: &Path) -> Result<(), LocateError> {
    fs::read_dir(root)
        .map(|_| ())
        .map_err(|source| LocateError::Unreadable {
            path: root.to_path_buf(),
            source,
        })
}

/// Default install locations for the current platform, most likely first.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if cfg!(target_os = "windows") {
        for var in ["PROGRAMFILES(X86)", "PROGRAMFILES"] {
            if let Some(base) = std::env::var_os(var).filter(|v| !v.is_empty()) {
                out.push(PathBuf::from(base).join("Steam"));
            }
        }
        out.push(PathBuf::from("C:/Steam"));
    } else if let Some(home) = dirs::home_dir() {
        if cfg!(target_os = "macos") {
            out.push(home.join("Library/Application Support/Steam"));
        } else {
            out.push(home.join(".local/share/Steam"));
            out.push(home.join(".steam/steam"));
            out.push(home.join(".steam/root"));
        }
    }
    out
}
