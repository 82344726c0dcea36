//! Text rendering for diff reports.

use super::model::DiffReport;

pub const NO_ACTIVE_MESSAGE: &str = "No active prompt loaded";
pub const UNMODIFIED_MESSAGE: &str = "No modifications (active = original)";

/// Render a report as `"{symbol} {content}"` lines, or a sentinel message
pub fn render_diff(report: &DiffReport) -> String {
    match report {
        DiffReport::NoActiveDocument => NO_ACTIVE_MESSAGE.to_string(),
        DiffReport::Unmodified => UNMODIFIED_MESSAGE.to_string(),
        DiffReport::Changes(lines) => lines
            .iter()
            .map(|l| format!("{} {}", l.marker.symbol(), l.content))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
