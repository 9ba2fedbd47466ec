//! Required-section validation
//!
//! Five independent checks, all run on every call:
//! title line, AI notice, required `##` sections, duplicate `##` sections and
//! the order of required sections.

use std::collections::HashMap;

use docs_content::ensure_document_title;
use docs_meta::{DocsConfig, DocumentTemplate, RequiredSection};
use docs_sections::heading_level;

use crate::issue::{IssueKind, StructuralIssue};

/// Number of leading lines searched for the AI notice.
const NOTICE_WINDOW: usize = 5;

/// A `##` heading as it appears in the document.
struct H2Heading {
    normalized: String,
    display: String,
    count: usize,
}

/// Distinct `##` headings in first-appearance order, with occurrence counts.
fn collect_h2_headings(text: &str) -> Vec<H2Heading> {
    let mut headings: Vec<H2Heading> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in text.lines() {
        let Some((2, title)) = heading_level(line) else {
            continue;
        };
        let normalized = title.to_lowercase();
        match index.get(&normalized) {
            Some(&i) => headings[i].count += 1,
            None => {
                index.insert(normalized.clone(), headings.len());
                headings.push(H2Heading {
                    normalized,
                    display: title.to_string(),
                    count: 1,
                });
            }
        }
    }

    headings
}

fn check_title(text: &str, package_title: &str, template: &DocumentTemplate) -> Option<StructuralIssue> {
    let expected = template.title_line(package_title);
    let first = text.lines().next().unwrap_or_default();

    if !first.starts_with("# ") {
        Some(StructuralIssue::new(
            IssueKind::Title,
            "document start",
            "Document does not start with an H1 title",
            format!("Add title: {expected}"),
        ))
    } else if first.trim() != expected {
        Some(StructuralIssue::new(
            IssueKind::Title,
            "document title",
            format!("Title format incorrect: got '{}'", first.trim()),
            format!("Use: {expected}"),
        ))
    } else {
        None
    }
}

fn check_notice(text: &str, template: &DocumentTemplate) -> Option<StructuralIssue> {
    let found = text
        .lines()
        .take(NOTICE_WINDOW)
        .skip(1)
        .any(|line| template.is_notice(line));

    (!found).then(|| {
        StructuralIssue::new(
            IssueKind::Title,
            "after title",
            "Missing AI-generated notice",
            format!("Add notice after title: {}", template.notice.trim()),
        )
    })
}

/// Required sections present in the document that appear earlier than
/// monotonic advancement through the required order allows.
fn check_order(headings: &[H2Heading], required: &[RequiredSection]) -> Vec<StructuralIssue> {
    let mut issues = Vec::new();
    let mut cursor = 0;

    for section in required {
        let wanted = section.name.trim().to_lowercase();
        if !headings.iter().any(|h| h.normalized == wanted) {
            continue;
        }

        match headings[cursor..].iter().position(|h| h.normalized == wanted) {
            Some(offset) => cursor += offset + 1,
            None => issues.push(StructuralIssue::new(
                IssueKind::Order,
                format!("## {}", section.name),
                format!("Section '## {}' is out of order", section.name),
                "Reorder sections to match the required structure",
            )),
        }
    }

    issues
}

/// Checks `text` against the title template and required-section schema.
///
/// Missing sections are reported in schema order, duplicates in the order
/// they first appear. Absent sections are never reported as out of order.
pub fn validate(text: &str, package_title: &str, config: &DocsConfig) -> Vec<StructuralIssue> {
    let mut issues = Vec::new();

    issues.extend(check_title(text, package_title, &config.template));
    issues.extend(check_notice(text, &config.template));

    let headings = collect_h2_headings(text);

    for section in &config.required_sections {
        let wanted = section.name.trim().to_lowercase();
        if !headings.iter().any(|h| h.normalized == wanted) {
            issues.push(StructuralIssue::new(
                IssueKind::Missing,
                format!("## {}", section.name),
                format!("Required section '## {}' is missing", section.name),
                "Add the missing section with appropriate content",
            ));
        }
    }

    for heading in headings.iter().filter(|h| h.count > 1) {
        issues.push(StructuralIssue::new(
            IssueKind::Duplicate,
            format!("## {}", heading.display),
            format!("Section '## {}' appears {} times", heading.display, heading.count),
            "Remove duplicate sections, keeping the first occurrence",
        ));
    }

    issues.extend(check_order(&headings, &config.required_sections));

    tracing::debug!(issues = issues.len(), "Validated document structure");
    issues
}

/// Fixes the title and notice, then validates.
///
/// Title issues are left out of the result since the fix guarantees them.
pub fn ensure_document_structure(
    text: &str,
    package_title: &str,
    config: &DocsConfig,
) -> (String, Vec<StructuralIssue>) {
    let content = ensure_document_title(text, package_title, &config.template);
    let issues = validate(&content, package_title, config)
        .into_iter()
        .filter(|issue| issue.kind != IssueKind::Title)
        .collect();
    (content, issues)
}
