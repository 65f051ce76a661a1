use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs;

/// Log tail scanning parameters (optional `[pause]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseConfig {
    /// Log files under `<steam root>/logs/` inspected for pause entries, in order.
    pub log_files: Vec<String>,
    /// Only the last `tail_lines` lines of each log are inspected.
    pub tail_lines: usize,
    /// At most this many bytes are read from the end of each log.
    pub tail_bytes: u64,
    /// Timestamped entries older than this (relative to the tick) are ignored.
    pub window_secs: u64,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            log_files: vec!["content_log.txt".to_string(), "download_log.txt".to_string()],
            tail_lines: 400,
            tail_bytes: 200_000,
            window_secs: 900,
        }
    }
}

/// Global configuration loaded from `~/.config/dlmon/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DlmonConfig {
    /// Number of samples taken by `dlmon watch`.
    pub samples: u32,
    /// Seconds between two samples.
    pub interval_secs: u64,
    /// Lower bound for the elapsed time used as a rate divisor.
    pub min_elapsed_secs: f64,
    /// Steam installation root; autodetected when missing.
    #[serde(default)]
    pub steam_root: Option<PathBuf>,
    /// Optional pause detection tuning; if missing, built-in defaults are used.
    #[serde(default)]
    pub pause: Option<PauseConfig>,
}

impl Default for DlmonConfig {
    fn default() -> Self {
        Self {
            samples: 5,
            interval_secs: 60,
            min_elapsed_secs: 0.001,
            steam_root: None,
            pause: None,
        }
    }
}

impl DlmonConfig {
    pub fn pause_or_default(&self) -> PauseConfig {
        self.pause.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    app_dirs::config_file()
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DlmonConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

pub fn load_or_init_at(path: &Path) -> Result<DlmonConfig> {
    if !path.exists() {
        let default_cfg = DlmonConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DlmonConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = DlmonConfig::default();
        assert_eq!(cfg.samples, 5);
        assert_eq!(cfg.interval_secs, 60);
        assert!(cfg.steam_root.is_none());
        assert_eq!(cfg.pause_or_default().tail_lines, 400);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = DlmonConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: DlmonConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            samples = 3
            interval_secs = 10
            min_elapsed_secs = 0.5
            steam_root = "/srv/steam"

            [pause]
            log_files = ["content_log.txt"]
            tail_lines = 50
            tail_bytes = 4096
            window_secs = 120
        "#;
        let cfg: DlmonConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.samples, 3);
        assert_eq!(cfg.interval_secs, 10);
        assert_eq!(cfg.steam_root.as_deref(), Some(Path::new("/srv/steam")));
        let pause = cfg.pause.as_ref().unwrap();
        assert_eq!(pause.log_files, vec!["content_log.txt".to_string()]);
        assert_eq!(pause.tail_lines, 50);
        assert_eq!(pause.window_secs, 120);
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, DlmonConfig::default());
        assert!(path.exists());

        fs::write(&path, "samples = 2\ninterval_secs = 1\nmin_elapsed_secs = 0.001\n").unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.samples, 2);
        assert!(cfg.pause.is_none());
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "samples = \"many\"").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
