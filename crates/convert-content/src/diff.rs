//! Unified diff computation

use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context shown around each hunk
const CONTEXT_LINES: usize = 3;

/// Compute a unified diff between two versions of the file at `path`.
///
/// Headers use the `a/` and `b/` prefixes. Identical input yields an empty
/// string, which callers treat as "no change".
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}

/// Line counts of a diff, for log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffStats {
    /// Count inserted and deleted lines between two texts.
    pub fn compute(old: &str, new: &str) -> Self {
        let mut stats = Self::default();
        if old == new {
            return stats;
        }
        for change in TextDiff::from_lines(old, new).iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => stats.insertions += 1,
                ChangeTag::Delete => stats.deletions += 1,
                ChangeTag::Equal => {}
            }
        }
        stats
    }

    /// True when the texts had no line-level differences.
    pub fn is_empty(&self) -> bool {
        self.insertions == 0 && self.deletions == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_yields_empty_diff() {
        assert_eq!(unified_diff("Gemfile", "a\nb\n", "a\nb\n"), "");
        assert!(DiffStats::compute("a\n", "a\n").is_empty());
    }

    #[test]
    fn headers_name_the_path() {
        let diff = unified_diff("manifests/init.pp", "class foo {}\n", "class foo {\n}\n");
        assert!(diff.starts_with("--- a/manifests/init.pp\n+++ b/manifests/init.pp\n"));
        assert!(diff.contains("-class foo {}\n"));
        assert!(diff.contains("+class foo {\n"));
    }

    #[test]
    fn hunks_are_limited_to_context_radius() {
        let old: String = (1..=20).map(|i| format!("line{}\n", i)).collect();
        let new = old.replace("line10\n", "LINE10\n");
        let diff = unified_diff("big.txt", &old, &new);

        assert!(diff.contains("@@ -7,7 +7,7 @@"));
        assert!(!diff.contains("line3\n"));
        assert!(!diff.contains("line17\n"));
    }

    #[test]
    fn stats_count_changed_lines() {
        let stats = DiffStats::compute("a\nb\nc\n", "a\nB\nc\nd\n");
        assert_eq!(
            stats,
            DiffStats {
                insertions: 2,
                deletions: 1
            }
        );
        assert!(!stats.is_empty());
    }
}
