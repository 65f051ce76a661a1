//! Samples and the finite-difference rate between two of them.

use std::fmt;

use crate::library::AppId;

/// Which source produced a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `BytesDownloaded` from the app manifest.
    Manifest,
    /// Total size of the staging directory.
    Folder,
    /// Neither source was available.
    Unknown,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Manifest => "manifest",
            Method::Folder => "folder",
            Method::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped byte-count observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub app_id: AppId,
    pub timestamp_secs: f64,
    pub observed_bytes: u64,
    pub method: Method,
}

/// Bytes per second from `prev` to `cur`.
///
/// Returns 0 unless both samples share the id and a known method: a change of
/// title or tier means the byte counts are not comparable. A decrease clamps
/// to 0. Elapsed time is floored at `min_elapsed_secs`.
pub fn rate_between(prev: Option<&Sample>, cur: &Sample, min_elapsed_secs: f64) -> f64 {
    let Some(prev) = prev else {
        return 0.0;
    };
    if prev.app_id != cur.app_id || prev.method != cur.method || cur.method == Method::Unknown {
        return 0.0;
    }
    let delta = cur.observed_bytes.saturating_sub(prev.observed_bytes);
    let elapsed = (cur.timestamp_secs - prev.timestamp_secs).max(min_elapsed_secs);
    delta as f64 / elapsed
}
