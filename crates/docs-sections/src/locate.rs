//! Title-based lookup over a parsed section forest.
//!
//! Lookups try an exact match first (case-insensitive, trimmed) and only then
//! fall back to containment in either direction. Short titles such as
//! "Overview" would otherwise match longer headings before their own.

use crate::section::Section;

fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Checks whether two titles are equal, ignoring case and surrounding whitespace.
pub fn titles_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Finds a section among `sections` (not their children) by title.
///
/// # Example
/// ```
/// use docs_sections::{find_by_title, parse_sections};
///
/// let sections = parse_sections("## What data does this integration collect?\n");
/// assert!(find_by_title(&sections, "data").is_some());
/// assert!(find_by_title(&sections, "completely unrelated").is_none());
/// ```
pub fn find_by_title<'a>(sections: &'a [Section], title: &str) -> Option<&'a Section> {
    let wanted = normalize(title);

    if let Some(section) = sections.iter().find(|s| normalize(&s.title) == wanted) {
        return Some(section);
    }

    if wanted.is_empty() {
        return None;
    }

    sections.iter().find(|s| {
        let candidate = normalize(&s.title);
        !candidate.is_empty() && (candidate.contains(&wanted) || wanted.contains(&candidate))
    })
}

/// Finds a section at any depth.
///
/// Each sibling list is searched as a whole before descending, so a match
/// among the top-level sections wins over a match in any subtree.
pub fn find_by_title_recursive<'a>(sections: &'a [Section], title: &str) -> Option<&'a Section> {
    find_by_title(sections, title).or_else(|| {
        flatten(sections)
            .into_iter()
            .find_map(|section| find_by_title(&section.children, title))
    })
}

/// Flattens the forest in pre-order: every section is followed by its whole
/// subtree before the next sibling.
pub fn flatten(sections: &[Section]) -> Vec<&Section> {
    let mut flat = Vec::new();
    let mut stack: Vec<&Section> = sections.iter().rev().collect();
    while let Some(section) = stack.pop() {
        flat.push(section);
        stack.extend(section.children.iter().rev());
    }
    flat
}

/// Returns the immediate parent of the section titled `child_title`.
///
/// Titles are compared exactly (case-insensitive, trimmed). Top-level
/// sections have no parent.
pub fn find_parent<'a>(sections: &'a [Section], child_title: &str) -> Option<&'a Section> {
    flatten(sections).into_iter().find(|section| {
        section
            .children
            .iter()
            .any(|child| titles_match(&child.title, child_title))
    })
}
