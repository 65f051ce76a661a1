//! Speed estimation from local download state.
//!
//! Each tick takes one measurement, preferring the manifest's progress
//! counter and falling back to the staging folder size, then differentiates
//! it against the single retained [`Sample`]. Rates are only computed
//! between samples of the same title and tier; anything else restarts the
//! baseline with a rate of 0.

mod measure;
mod sample;

pub use measure::{manifest_progress, staging_folder_bytes};
pub use sample::{rate_between, Method, Sample};

use crate::library::{AppId, SteamLibrary};
use crate::vdf::ManifestProgress;

/// One measurement before differentiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub observed_bytes: u64,
    pub method: Method,
    /// Manifest progress, when the manifest had it (even if another tier won).
    pub progress: Option<ManifestProgress>,
}

impl Reading {
    pub fn unknown() -> Self {
        Self {
            observed_bytes: 0,
            method: Method::Unknown,
            progress: None,
        }
    }
}

/// Result of one estimator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub bytes_per_sec: f64,
    pub method: Method,
    pub progress: Option<ManifestProgress>,
}

#[derive(Debug)]
pub struct SpeedEstimator {
    previous: Option<Sample>,
    min_elapsed_secs: f64,
}

impl SpeedEstimator {
    pub fn new(min_elapsed_secs: f64) -> Self {
        Self {
            previous: None,
            min_elapsed_secs,
        }
    }

    pub fn previous(&self) -> Option<&Sample> {
        self.previous.as_ref()
    }

    /// Drop the retained sample (the download went away).
    pub fn forget(&mut self) {
        if let Some(prev) = self.previous.take() {
            tracing::debug!(app_id = %prev.app_id, "forgetting sample");
        }
    }

    /// Measure `id` now and return the rate against the previous sample.
    pub fn estimate(&mut self, library: &SteamLibrary, id: &AppId, now_secs: f64) -> Estimate {
        let reading = self.measure(library, id);
        self.record(id, now_secs, reading)
    }

    /// Take one reading, manifest tier first.
    pub fn measure(&self, library: &SteamLibrary, id: &AppId) -> Reading {
        let folder = || staging_folder_bytes(library, id);

        if let Some(progress) = manifest_progress(library, id) {
            if self.is_manifest_regression(id, progress.downloaded) {
                // Manifest counter went backwards: treat it as reset for this tick.
                if let Some(bytes) = folder() {
                    tracing::debug!(app_id = %id, "manifest counter regressed; using folder size");
                    return Reading {
                        observed_bytes: bytes,
                        method: Method::Folder,
                        progress: Some(progress),
                    };
                }
                tracing::debug!(app_id = %id, "manifest counter regressed and no staging folder");
            }
            return Reading {
                observed_bytes: progress.downloaded,
                method: Method::Manifest,
                progress: Some(progress),
            };
        }

        match folder() {
            Some(bytes) => Reading {
                observed_bytes: bytes,
                method: Method::Folder,
                progress: None,
            },
            None => Reading::unknown(),
        }
    }

    fn is_manifest_regression(&self, id: &AppId, downloaded: u64) -> bool {
        matches!(
            &self.previous,
            Some(prev) if prev.app_id == *id
                && prev.method == Method::Manifest
                && downloaded < prev.observed_bytes
        )
    }

    /// Store `reading` as the new sample and return the rate against the old one.
    pub fn record(&mut self, id: &AppId, now_secs: f64, reading: Reading) -> Estimate {
        let sample = Sample {
            app_id: id.clone(),
            timestamp_secs: now_secs,
            observed_bytes: reading.observed_bytes,
            method: reading.method,
        };

        if let Some(prev) = &self.previous {
            if prev.app_id != sample.app_id {
                tracing::debug!(old = %prev.app_id, new = %sample.app_id, "download changed; resetting baseline");
            } else if prev.method != sample.method {
                tracing::debug!(
                    app_id = %id,
                    from = %prev.method,
                    to = %sample.method,
                    "measurement tier changed; discarding delta"
                );
            }
        }

        let bytes_per_sec = rate_between(self.previous.as_ref(), &sample, self.min_elapsed_secs);
        self.previous = Some(sample);

        Estimate {
            bytes_per_sec,
            method: reading.method,
            progress: reading.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> AppId {
        AppId::from_dir_name(s).unwrap()
    }

    fn reading(bytes: u64, method: Method) -> Reading {
        Reading {
            observed_bytes: bytes,
            method,
            progress: None,
        }
    }

    #[test]
    fn manifest_scenario_one_megabyte_per_second() {
        let mut est = SpeedEstimator::new(0.001);
        let app = id("570");
        let first = est.record(&app, 0.0, reading(1_000_000, Method::Manifest));
        assert_eq!(first.bytes_per_sec, 0.0);
        let second = est.record(&app, 60.0, reading(61_000_000, Method::Manifest));
        assert!((second.bytes_per_sec - 1_000_000.0).abs() < 1e-6);
        assert_eq!(second.method, Method::Manifest);
    }

    #[test]
    fn tier_switch_stores_new_baseline() {
        let mut est = SpeedEstimator::new(0.001);
        let app = id("570");
        est.record(&app, 0.0, reading(1_000_000, Method::Manifest));
        est.record(&app, 60.0, reading(61_000_000, Method::Manifest));
        let third = est.record(&app, 120.0, reading(61_500_000, Method::Folder));
        assert_eq!(third.bytes_per_sec, 0.0);
        assert_eq!(third.method, Method::Folder);
        assert_eq!(est.previous().unwrap().observed_bytes, 61_500_000);
        let fourth = est.record(&app, 180.0, reading(67_500_000, Method::Folder));
        assert!((fourth.bytes_per_sec - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn new_id_resets_baseline() {
        let mut est = SpeedEstimator::new(0.001);
        est.record(&id("440"), 0.0, reading(0, Method::Folder));
        let e = est.record(&id("570"), 60.0, reading(6_000_000, Method::Folder));
        assert_eq!(e.bytes_per_sec, 0.0);
        assert_eq!(est.previous().unwrap().app_id, id("570"));
    }

    #[test]
    fn unknown_reading_is_zero_and_breaks_the_chain() {
        let mut est = SpeedEstimator::new(0.001);
        let app = id("570");
        est.record(&app, 0.0, reading(1_000, Method::Folder));
        let e = est.record(&app, 60.0, Reading::unknown());
        assert_eq!(e.bytes_per_sec, 0.0);
        assert_eq!(e.method, Method::Unknown);
        let e = est.record(&app, 120.0, reading(9_000, Method::Folder));
        assert_eq!(e.bytes_per_sec, 0.0);
    }

    #[test]
    fn forget_clears_sample() {
        let mut est = SpeedEstimator::new(0.001);
        est.record(&id("570"), 0.0, reading(1, Method::Folder));
        est.forget();
        assert!(est.previous().is_none());
    }
}
