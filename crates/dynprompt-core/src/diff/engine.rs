//! Diff computation.

use super::model::{DiffLine, DiffMarker, DiffReport};

/// Compare `backup` and `active` line by line
///
/// Lines are compared including their terminators, so a final line that
/// gained or lost its newline counts as changed. Two documents that differ
/// therefore always yield a non-empty `Changes`. A missing backup is treated
/// as an empty baseline.
pub fn compute_diff(backup: Option<&str>, active: Option<&str>) -> DiffReport {
    let Some(active) = active else {
        return DiffReport::NoActiveDocument;
    };
    let backup = backup.unwrap_or("");
    if backup == active {
        return DiffReport::Unmodified;
    }

    let backup_lines: Vec<&str> = backup.split_inclusive('\n').collect();
    let active_lines: Vec<&str> = active.split_inclusive('\n').collect();

    let mut lines = Vec::new();

    for (index, line) in active_lines.iter().enumerate() {
        match backup_lines.get(index) {
            None => lines.push(marked(DiffMarker::Added, index, line)),
            Some(original) if original != line => {
                lines.push(marked(DiffMarker::Changed, index, line))
            }
            Some(_) => {}
        }
    }

    for (index, line) in backup_lines.iter().enumerate().skip(active_lines.len()) {
        lines.push(marked(DiffMarker::Removed, index, line));
    }

    DiffReport::Changes(lines)
}

fn marked(marker: DiffMarker, index: usize, line: &str) -> DiffLine {
    DiffLine {
        marker,
        index,
        content: line.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_active() {
        assert_eq!(compute_diff(Some("A\n"), None), DiffReport::NoActiveDocument);
        assert_eq!(compute_diff(None, None), DiffReport::NoActiveDocument);
    }

    #[test]
    fn test_identical() {
        assert_eq!(compute_diff(Some("A\nB\n"), Some("A\nB\n")), DiffReport::Unmodified);
    }

    #[test]
    fn test_changed_then_added() {
        let report = compute_diff(Some("A\nB\n"), Some("A\nX\nC\n"));
        assert_eq!(
            report.lines(),
            &[
                DiffLine {
                    marker: DiffMarker::Changed,
                    index: 1,
                    content: "X".into()
                },
                DiffLine {
                    marker: DiffMarker::Added,
                    index: 2,
                    content: "C".into()
                },
            ]
        );
    }

    #[test]
    fn test_removals_come_last() {
        let report = compute_diff(Some("A\nB\nC\n"), Some("Z\n"));
        let markers: Vec<_> = report.lines().iter().map(|l| l.marker).collect();
        assert_eq!(
            markers,
            vec![DiffMarker::Changed, DiffMarker::Removed, DiffMarker::Removed]
        );
        assert_eq!(report.lines()[2].content, "C");
        assert_eq!(report.lines()[2].index, 2);
    }

    #[test]
    fn test_insert_at_top_cascades() {
        let report = compute_diff(Some("B\nC\n"), Some("A\nB\nC\n"));
        let markers: Vec<_> = report.lines().iter().map(|l| l.marker).collect();
        assert_eq!(
            markers,
            vec![DiffMarker::Changed, DiffMarker::Changed, DiffMarker::Added]
        );
    }

    #[test]
    fn test_trailing_newline_counts_as_change() {
        let report = compute_diff(Some("A"), Some("A\n"));
        assert_eq!(report.lines().len(), 1);
        assert_eq!(report.lines()[0].marker, DiffMarker::Changed);
    }

    #[test]
    fn test_missing_backup_reports_all_added() {
        let report = compute_diff(None, Some("A\nB\n"));
        assert!(report
            .lines()
            .iter()
            .all(|l| l.marker == DiffMarker::Added));
        assert_eq!(report.lines().len(), 2);
    }
}
