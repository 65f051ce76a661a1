//! One sampling tick: find the download, measure it, classify it.

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::classify::{classify, Status};
use crate::config::DlmonConfig;
use crate::estimator::{Method, SpeedEstimator};
use crate::finder::find_active_download;
use crate::library::{AppId, SteamLibrary};
use crate::locator::LocateError;
use crate::pause_signal::PauseDetector;
use crate::title::resolve_title;
use crate::vdf::ManifestProgress;

/// What one tick observed. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedReport {
    pub at: DateTime<Local>,
    /// `None` when nothing is downloading (or Steam was not found).
    pub app_id: Option<AppId>,
    pub title: Option<String>,
    pub status: Status,
    pub bytes_per_sec: f64,
    pub method: Method,
    pub progress: Option<ManifestProgress>,
}

impl SpeedReport {
    fn idle(at: DateTime<Local>) -> Self {
        Self {
            at,
            app_id: None,
            title: None,
            status: Status::Idle,
            bytes_per_sec: 0.0,
            method: Method::Unknown,
            progress: None,
        }
    }
}

/// Tick driver. Holds the only state that crosses ticks: the estimator's sample.
#[derive(Debug)]
pub struct Monitor {
    library: Option<SteamLibrary>,
    estimator: SpeedEstimator,
    detector: PauseDetector,
}

impl Monitor {
    /// `library` is `None` when no Steam installation was found; every tick is then Idle.
    pub fn new(library: Option<SteamLibrary>, cfg: &DlmonConfig) -> Result<Self> {
        Ok(Self {
            library,
            estimator: SpeedEstimator::new(cfg.min_elapsed_secs),
            detector: PauseDetector::new(cfg.pause_or_default())?,
        })
    }

    /// Run one tick at `now`. Only an unreadable download state directory is an error.
    pub fn tick(&mut self, now: DateTime<Local>) -> Result<SpeedReport, LocateError> {
        let Some(library) = &self.library else {
            return Ok(SpeedReport::idle(now));
        };

        let Some(app_id) = find_active_download(library)? else {
            self.estimator.forget();
            tracing::debug!("no active download");
            return Ok(SpeedReport::idle(now));
        };

        let title = resolve_title(library, &app_id);
        let now_secs = now.timestamp_millis() as f64 / 1000.0;
        let estimate = self.estimator.estimate(library, &app_id, now_secs);

        // The log only matters when the speed is zero.
        let pause_signal = estimate.method != Method::Unknown
            && estimate.bytes_per_sec == 0.0
            && self
                .detector
                .recent_pause_signal(&library.logs_dir(), &app_id, now.naive_local());

        let status = classify(true, estimate.method, estimate.bytes_per_sec, pause_signal);
        tracing::debug!(
            app_id = %app_id,
            %status,
            method = %estimate.method,
            bytes_per_sec = estimate.bytes_per_sec,
            "tick"
        );

        Ok(SpeedReport {
            at: now,
            app_id: Some(app_id),
            title: Some(title),
            status,
            bytes_per_sec: estimate.bytes_per_sec,
            method: estimate.method,
            progress: estimate.progress,
        })
    }
}
