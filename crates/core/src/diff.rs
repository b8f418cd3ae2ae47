//! Line-oriented text comparison.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

pub const DEFAULT_CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Equal,
    Added,
    Removed,
}

/// One line of the comparison. Line numbers are 1-based and absent on the
/// side the line does not exist in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub identical: bool,
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub lines: Vec<DiffLine>,
}

fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

pub fn compare(original: &str, modified: &str) -> DiffReport {
    let diff = TextDiff::from_lines(original, modified);

    let mut report = DiffReport {
        identical: true,
        added: 0,
        removed: 0,
        unchanged: 0,
        lines: Vec::new(),
    };

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => {
                report.unchanged += 1;
                LineKind::Equal
            }
            ChangeTag::Insert => {
                report.added += 1;
                LineKind::Added
            }
            ChangeTag::Delete => {
                report.removed += 1;
                LineKind::Removed
            }
        };
        report.lines.push(DiffLine {
            kind,
            old_line: change.old_index().map(|i| i + 1),
            new_line: change.new_index().map(|i| i + 1),
            text: strip_newline(change.value()).to_string(),
        });
    }

    report.identical = report.added == 0 && report.removed == 0;
    report
}

/// Render a unified diff with `context` unchanged lines around each hunk.
/// Identical inputs produce an empty string.
pub fn unified(original: &str, modified: &str, context: usize) -> String {
    let diff = TextDiff::from_lines(original, modified);
    diff.unified_diff()
        .context_radius(context)
        .header("original", "modified")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: &str = "a\nb\nc\n";
    const MODIFIED: &str = "a\nB\nc\nd\n";

    // ============================================================================
    // compare tests
    // ============================================================================

    #[test]
    fn test_compare_counts_and_order() {
        let report = compare(ORIGINAL, MODIFIED);
        assert!(!report.identical);
        assert_eq!(
            (report.added, report.removed, report.unchanged),
            (2, 1, 2)
        );

        let summary: Vec<(LineKind, &str)> = report
            .lines
            .iter()
            .map(|l| (l.kind, l.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (LineKind::Equal, "a"),
                (LineKind::Removed, "b"),
                (LineKind::Added, "B"),
                (LineKind::Equal, "c"),
                (LineKind::Added, "d"),
            ]
        );
    }

    #[test]
    fn test_compare_line_numbers() {
        let report = compare(ORIGINAL, MODIFIED);
        assert_eq!(report.lines[1].old_line, Some(2));
        assert_eq!(report.lines[1].new_line, None);
        assert_eq!(report.lines[2].old_line, None);
        assert_eq!(report.lines[2].new_line, Some(2));
        assert_eq!(report.lines[4].new_line, Some(4));
    }

    #[test]
    fn test_compare_identical() {
        let report = compare("same\r\ntext", "same\r\ntext");
        assert!(report.identical);
        assert_eq!(report.unchanged, 2);
        assert_eq!(report.lines[0].text, "same");
    }

    // ============================================================================
    // unified tests
    // ============================================================================

    #[test]
    fn test_unified_output() {
        let patch = unified(ORIGINAL, MODIFIED, DEFAULT_CONTEXT);
        assert!(patch.starts_with("--- original\n+++ modified\n"));
        for line in ["-b\n", "+B\n", "+d\n", " a\n"] {
            assert!(patch.contains(line), "missing {line:?} in {patch}");
        }
    }

    #[test]
    fn test_unified_identical_is_empty() {
        assert_eq!(unified(ORIGINAL, ORIGINAL, DEFAULT_CONTEXT), "");
    }
}
