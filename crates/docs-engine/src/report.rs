//! Change reports between a document and its finalized form

use similar::{ChangeTag, TextDiff};

/// Lines of context around each hunk of [`ChangeReport::unified_diff`].
const CONTEXT_RADIUS: usize = 3;

/// A line-level summary of what finalization changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeReport {
    pub inserted_lines: usize,
    pub removed_lines: usize,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f32,
    /// Unified diff, empty when nothing changed.
    pub unified_diff: String,
}

impl ChangeReport {
    /// A report for identical inputs.
    pub fn unchanged() -> Self {
        Self {
            inserted_lines: 0,
            removed_lines: 0,
            similarity: 1.0,
            unified_diff: String::new(),
        }
    }

    /// Compare two documents line by line.
    pub fn between(before: &str, after: &str) -> Self {
        if before == after {
            return Self::unchanged();
        }

        let diff = TextDiff::from_lines(before, after);
        let mut inserted_lines = 0;
        let mut removed_lines = 0;
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => inserted_lines += 1,
                ChangeTag::Delete => removed_lines += 1,
                ChangeTag::Equal => {}
            }
        }

        let unified_diff = diff
            .unified_diff()
            .context_radius(CONTEXT_RADIUS)
            .header("generated", "finalized")
            .to_string();

        Self {
            inserted_lines,
            removed_lines,
            similarity: diff.ratio(),
            unified_diff,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.inserted_lines == 0 && self.removed_lines == 0
    }
}
