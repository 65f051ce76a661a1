//! Recent pause signal from the tail of Steam's activity logs.
//!
//! Only the tail of each log is read. Walking from the newest line back, the
//! first line that names the AppID and carries a state keyword decides:
//! pause keywords mean paused, running keywords mean not paused. Lines with a
//! leading timestamp older than the window end the scan. This is a heuristic;
//! missing or unreadable logs simply yield no signal.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;

use crate::config::PauseConfig;
use crate::library::AppId;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub struct PauseDetector {
    cfg: PauseConfig,
    timestamp_re: Regex,
    app_re: Regex,
    paused_re: Regex,
    running_re: Regex,
}

impl PauseDetector {
    pub fn new(cfg: PauseConfig) -> Result<Self> {
        Ok(Self {
            cfg,
            timestamp_re: Regex::new(r"^\s*\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\]")?,
            app_re: Regex::new(r"(?i)\bapp\s*id\s*[:=]?\s*(\d+)\b")?,
            // "Started" stays set while an update is paused, so it is not a running keyword.
            paused_re: Regex::new(r"(?i)\b(paused|suspended)\b")?,
            running_re: Regex::new(r"(?i)\b(running|resumed|downloading)\b")?,
        })
    }

    /// True if the logs show `id` paused within the window ending at `now`.
    pub fn recent_pause_signal(&self, logs_dir: &Path, id: &AppId, now: NaiveDateTime) -> bool {
        for name in &self.cfg.log_files {
            let path = logs_dir.join(name);
            let text = match read_tail(&path, self.cfg.tail_bytes) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(path = %path.display(), "log tail unavailable: {}", e);
                    continue;
                }
            };
            let newest_first = text.lines().rev().take(self.cfg.tail_lines);
            if let Some(paused) = self.latest_state(newest_first, id, now) {
                tracing::debug!(app_id = %id, log = %name, paused, "log state for download");
                return paused;
            }
        }
        false
    }

    /// Decision from the newest state line for `id`, or `None` if there is none in the window.
    pub fn latest_state<'a>(
        &self,
        newest_first: impl Iterator<Item = &'a str>,
        id: &AppId,
        now: NaiveDateTime,
    ) -> Option<bool> {
        let window = i64::try_from(self.cfg.window_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        for line in newest_first {
            if let Some(ts) = self.timestamp(line) {
                if now - ts > window {
                    return None;
                }
            }
            if !self.mentions(line, id) {
                continue;
            }
            if self.paused_re.is_match(line) {
                return Some(true);
            }
            if self.running_re.is_match(line) {
                return Some(false);
            }
        }
        None
    }

    fn timestamp(&self, line: &str) -> Option<NaiveDateTime> {
        let caps = self.timestamp_re.captures(line)?;
        NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), TIMESTAMP_FORMAT).ok()
    }

    fn mentions(&self, line: &str, id: &AppId) -> bool {
        self.app_re
            .captures_iter(line)
            .filter_map(|c| c.get(1))
            .any(|m| m.as_str() == id.as_str())
    }
}

/// Last `max_bytes` of the file as text, starting at a line boundary.
fn read_tail(path: &Path, max_bytes: u64) -> io::Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let start = len.saturating_sub(max_bytes);
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::new();
    file.take(max_bytes).read_to_end(&mut buf)?;

    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if start > 0 {
        // First line is likely cut.
        match text.find('\n') {
            Some(pos) => {
                text.drain(..=pos);
            }
            None => text.clear(),
        }
    }
    Ok(text)
}
