//! Structural issue types

use std::fmt;

use serde::Serialize;

/// The category of a structural issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Wrong or missing title line, or missing AI notice.
    Title,
    /// A required section or subsection is absent.
    Missing,
    /// A `##` heading appears more than once.
    Duplicate,
    /// A required section appears out of the required order.
    Order,
    /// Heading levels skip a level or the document does not open with an H1.
    Hierarchy,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Title => "title",
            IssueKind::Missing => "missing",
            IssueKind::Duplicate => "duplicate",
            IssueKind::Order => "order",
            IssueKind::Hierarchy => "hierarchy",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structural problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralIssue {
    pub kind: IssueKind,
    /// Where the issue occurs, e.g. `## Overview` or `after title`.
    pub location: String,
    pub message: String,
    /// How to fix it.
    pub suggestion: String,
}

impl StructuralIssue {
    pub fn new(
        kind: IssueKind,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Renders issues as a numbered list for display or for a regeneration prompt.
pub fn format_issues(issues: &[StructuralIssue]) -> String {
    if issues.is_empty() {
        return "No structural issues found.".to_string();
    }

    let mut out = String::new();
    for (i, issue) in issues.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, issue));
        if !issue.suggestion.is_empty() {
            out.push_str(&format!("   Suggestion: {}\n", issue.suggestion));
        }
    }
    out
}
