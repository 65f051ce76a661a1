//! Paused / downloading / idle classification for one tick.

use std::fmt;

use crate::estimator::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Downloading,
    Paused,
    Idle,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Downloading => "downloading",
            Status::Paused => "paused",
            Status::Idle => "idle",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify from this tick's inputs only.
///
/// Zero speed alone may be a sampling artifact and a log entry alone may be
/// stale, so Paused needs both.
pub fn classify(active: bool, method: Method, bytes_per_sec: f64, pause_signal: bool) -> Status {
    if !active || method == Method::Unknown {
        return Status::Idle;
    }
    if bytes_per_sec == 0.0 && pause_signal {
        Status::Paused
    } else {
        Status::Downloading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_without_download_or_measurement() {
        assert_eq!(classify(false, Method::Manifest, 0.0, true), Status::Idle);
        assert_eq!(classify(false, Method::Folder, 10.0, false), Status::Idle);
        assert_eq!(classify(true, Method::Unknown, 0.0, true), Status::Idle);
    }

    #[test]
    fn paused_needs_zero_speed_and_signal() {
        for method in [Method::Manifest, Method::Folder] {
            assert_eq!(classify(true, method, 0.0, true), Status::Paused);
            assert_eq!(classify(true, method, 0.0, false), Status::Downloading);
            assert_eq!(classify(true, method, 512.0, true), Status::Downloading);
            assert_eq!(classify(true, method, 512.0, false), Status::Downloading);
        }
    }
}
