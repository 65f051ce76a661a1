//! Console formatting for sample reports.

use dlmon_core::classify::Status;
use dlmon_core::monitor::SpeedReport;

const MIB: f64 = 1024.0 * 1024.0;
const KIB: f64 = 1024.0;

/// "12.34 MB/s" from 1 MiB/s upwards, whole "KB/s" below.
pub fn format_speed(bytes_per_sec: f64) -> String {
    let mbps = bytes_per_sec / MIB;
    if mbps >= 1.0 {
        return format!("{mbps:.2} MB/s");
    }
    format!("{:.0} KB/s", bytes_per_sec / KIB)
}

pub fn format_line(report: &SpeedReport) -> String {
    let ts = report.at.format("%H:%M:%S");
    let speed = format_speed(report.bytes_per_sec);

    let Some(app_id) = &report.app_id else {
        return format!("[{ts}] No active downloads. | {} | speed={speed}", Status::Idle);
    };

    let title = report.title.as_deref().unwrap_or(app_id.as_str());
    let mut line = format!(
        "[{ts}] {title} ({app_id}) | {} | speed={speed} | source={}",
        report.status, report.method
    );
    if let Some(fraction) = report.progress.and_then(|p| p.fraction()) {
        line.push_str(&format!(" | {:.1}%", fraction * 100.0));
    }
    line
}
