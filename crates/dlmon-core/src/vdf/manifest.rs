//! Typed view over `appmanifest_<id>.acf`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use super::{parse, Section, VdfError};

const ROOT_KEY: &str = "AppState";
const NAME_KEY: &str = "name";
const BYTES_DOWNLOADED_KEY: &str = "BytesDownloaded";
const BYTES_TO_DOWNLOAD_KEY: &str = "BytesToDownload";

/// Download progress as recorded in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestProgress {
    pub downloaded: u64,
    /// `None` when the total field is present but not numeric.
    pub total: Option<u64>,
}

impl ManifestProgress {
    /// Fraction complete in [0.0, 1.0], if the total is known and non-zero.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some((self.downloaded as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppManifest {
    app_state: Section,
}

impl FromStr for AppManifest {
    type Err = VdfError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let root = parse(text)?;
        // Some tools write the fields without the outer block.
        let app_state = root.section(ROOT_KEY).cloned().unwrap_or(root);
        Ok(Self { app_state })
    }
}

impl AppManifest {
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        text.parse::<Self>().with_context(|| format!("parse {}", path.display()))
    }

    /// Display name, if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        self.app_state
            .value(NAME_KEY)
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Progress fields; `None` unless both are present and the downloaded count is numeric.
    pub fn progress(&self) -> Option<ManifestProgress> {
        let downloaded = self.app_state.value(BYTES_DOWNLOADED_KEY)?;
        let total = self.app_state.value(BYTES_TO_DOWNLOAD_KEY)?;
        let downloaded = downloaded.trim().parse::<u64>().ok()?;
        Some(ManifestProgress {
            downloaded,
            total: total.trim().parse::<u64>().ok(),
        })
    }
}
