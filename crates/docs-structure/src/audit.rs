//! Subsection and heading-hierarchy audits
//!
//! These go beyond [`validate`](crate::validate) and are combined with it by
//! [`audit`].

use std::sync::LazyLock;

use docs_meta::{DocsConfig, RequiredSection};
use docs_sections::{Section, flatten, parse_sections, titles_match};
use regex::Regex;

use crate::issue::{IssueKind, StructuralIssue};
use crate::validate::validate;

/// Any ATX heading from `#` to `######`, capturing the hashes.
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]").unwrap());

fn has_subsection(parent: &Section, name: &str) -> bool {
    flatten(&parent.children)
        .into_iter()
        .any(|s| s.level == 3 && titles_match(&s.title, name))
}

/// Reports required `###` subsections missing from their `##` section.
///
/// Sections that are absent altogether are skipped; [`validate`] already
/// reports them.
pub fn check_required_subsections(text: &str, required: &[RequiredSection]) -> Vec<StructuralIssue> {
    let sections = parse_sections(text);
    let mut issues = Vec::new();

    for section in required.iter().filter(|s| !s.subsections.is_empty()) {
        let Some(parent) = sections
            .iter()
            .find(|s| s.level == 2 && titles_match(&s.title, &section.name))
        else {
            continue;
        };

        for name in &section.subsections {
            if !has_subsection(parent, name) {
                issues.push(StructuralIssue::new(
                    IssueKind::Missing,
                    format!("## {}", section.name),
                    format!(
                        "Required subsection '### {}' is missing from '## {}'",
                        name, section.name
                    ),
                    format!("Add a '### {}' subsection under '## {}'", name, section.name),
                ));
            }
        }
    }

    issues
}

/// Reports heading-level problems: no headings at all, a first heading that
/// is not an H1, and jumps of more than one level deeper.
pub fn check_heading_hierarchy(text: &str) -> Vec<StructuralIssue> {
    let headings: Vec<(usize, usize)> = text
        .lines()
        .enumerate()
        .filter_map(|(i, line)| HEADING.captures(line).map(|caps| (i + 1, caps[1].len())))
        .collect();

    let Some(&(_, first_level)) = headings.first() else {
        return vec![StructuralIssue::new(
            IssueKind::Hierarchy,
            "document",
            "No headings found in document",
            "Add a title heading (#) and section headings (##)",
        )];
    };

    let mut issues = Vec::new();
    if first_level != 1 {
        issues.push(StructuralIssue::new(
            IssueKind::Hierarchy,
            "document title",
            "Document should start with a single # heading (H1)",
            "Change the first heading to use a single #",
        ));
    }

    for pair in headings.windows(2) {
        let (_, previous) = pair[0];
        let (line, level) = pair[1];
        if level > previous + 1 {
            issues.push(StructuralIssue::new(
                IssueKind::Hierarchy,
                format!("line {line}"),
                format!("Heading level jumps from H{previous} to H{level}"),
                "Use sequential heading levels without skipping",
            ));
        }
    }

    issues
}

/// Runs [`validate`] followed by both audits.
pub fn audit(text: &str, package_title: &str, config: &DocsConfig) -> Vec<StructuralIssue> {
    let mut issues = validate(text, package_title, config);
    issues.extend(check_required_subsections(text, &config.required_sections));
    issues.extend(check_heading_hierarchy(text));
    issues
}
