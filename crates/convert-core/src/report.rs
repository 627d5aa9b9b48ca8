//! Human-readable summaries and diff reports for a change set

use convert_fs::NormalizedPath;

use crate::changeset::{ChangeSet, OperationKind};
use crate::sink::ReportSink;

/// Width of section banners.
pub const BANNER_WIDTH: usize = 40;

/// Project-relative paths per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub added: Vec<NormalizedPath>,
    pub modified: Vec<NormalizedPath>,
    pub removed: Vec<NormalizedPath>,
}

impl Summary {
    pub fn category(&self, kind: OperationKind) -> &[NormalizedPath] {
        match kind {
            OperationKind::Add => &self.added,
            OperationKind::Modify => &self.modified,
            OperationKind::Remove => &self.removed,
        }
    }

    /// Categories in the order they are reported and applied.
    pub fn by_category(&self) -> [(OperationKind, &[NormalizedPath]); 3] {
        [
            (OperationKind::Add, self.added.as_slice()),
            (OperationKind::Modify, self.modified.as_slice()),
            (OperationKind::Remove, self.removed.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }
}

/// Collect the paths of each category.
pub fn summarize(changes: &ChangeSet) -> Summary {
    let grouped = changes.changes();
    let collect = |kind: OperationKind| -> Vec<NormalizedPath> {
        grouped
            .category(kind)
            .iter()
            .map(|op| op.path().clone())
            .collect()
    };
    Summary {
        added: collect(OperationKind::Add),
        modified: collect(OperationKind::Modify),
        removed: collect(OperationKind::Remove),
    }
}

/// Diffs of every modified file under a timestamped header.
///
/// Returns `None` when nothing is modified.
pub fn full_report(changes: &ChangeSet, timestamp: &str) -> Option<String> {
    let grouped = changes.changes();
    if grouped.modified.is_empty() {
        return None;
    }

    let mut report = format!("/* Convert Report generated at {timestamp} */");
    for operation in &grouped.modified {
        if let Some(diff) = operation.diff() {
            report.push_str("\n\n\n");
            report.push_str(diff);
        }
    }
    Some(report)
}

/// Center `text` in a line of `-` at least `width` characters long.
///
/// Odd padding puts the extra character on the left.
pub fn generate_banner(text: &str, width: usize) -> String {
    let text_width = text.chars().count();
    let padding = width.saturating_sub(text_width);
    let left = padding.div_ceil(2);
    let right = padding / 2;
    format!("{}{}{}", "-".repeat(left), text, "-".repeat(right))
}

/// Print the files to be changed, one banner per non-empty category,
/// closed by an empty banner.
pub fn print_summary(summary: &Summary, sink: &mut dyn ReportSink) {
    let mut printed = false;
    for (kind, paths) in summary.by_category() {
        if paths.is_empty() {
            continue;
        }
        sink.write_line("");
        sink.write_line(&generate_banner(
            &format!("Files to be {}", kind.category()),
            BANNER_WIDTH,
        ));
        for path in paths {
            sink.write_line(path.as_str());
        }
        printed = true;
    }
    if printed {
        sink.write_line("");
        sink.write_line(&generate_banner("", BANNER_WIDTH));
    }
}

/// Print the closing line after a successful apply.
pub fn print_result(summary: &Summary, sink: &mut dyn ReportSink) {
    let counts: Vec<String> = summary
        .by_category()
        .into_iter()
        .filter(|(_, paths)| !paths.is_empty())
        .map(|(kind, paths)| format!("{} files {}", paths.len(), kind.category()))
        .collect();

    sink.write_line("");
    sink.write_line(&generate_banner("Convert completed", BANNER_WIDTH));
    sink.write_line("");
    sink.write_line(&format!("{}.", counts.join(", ")));
    sink.write_line("");
}
