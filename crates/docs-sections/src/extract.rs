//! Helpers that pull sections and preserve blocks out of raw markdown.
//!
//! These work on text rather than on a parsed tree, because their inputs are
//! often raw generator responses that are not yet well-formed documents.

use std::collections::HashMap;

use crate::locate::flatten;
use crate::section::{
    PRESERVE_END, PRESERVE_START, Section, heading_level, parse_sections, starts_with_heading,
};

/// Returns every complete preserve block in `text`, markers included.
///
/// # Example
/// ```
/// use docs_sections::extract_preserve_blocks;
///
/// let text = "a\n<!-- PRESERVE START -->\nkeep me\n<!-- PRESERVE END -->\nb";
/// let blocks = extract_preserve_blocks(text);
/// assert_eq!(blocks, vec!["<!-- PRESERVE START -->\nkeep me\n<!-- PRESERVE END -->"]);
/// ```
pub fn extract_preserve_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    while let Some(start) = text[offset..].find(PRESERVE_START) {
        let start = offset + start;
        let Some(end) = text[start..].find(PRESERVE_END) else {
            break;
        };
        let end = start + end + PRESERVE_END.len();
        blocks.push(text[start..end].to_string());
        offset = end;
    }

    blocks
}

/// Checks that every preserve block of `original` survives verbatim in `updated`.
pub fn preserved_blocks_kept(original: &str, updated: &str) -> bool {
    extract_preserve_blocks(original)
        .iter()
        .all(|block| updated.contains(block.as_str()))
}

/// Number of leading `#` characters of a line, without trimming.
fn leading_hashes(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b'#').count()
}

/// Extracts the body of the first section whose heading matches one of `keywords`.
///
/// A plain keyword matches a `## keyword...` heading, then a `### keyword...`
/// heading. A keyword that starts with `#` is matched literally against the
/// start of a line and its `#` count gives the section level. The body runs up
/// to the next heading of the same or a shallower level and is returned
/// trimmed. Keywords whose section is empty are skipped.
pub fn extract_section_by_keyword(text: &str, keywords: &[&str]) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    for keyword in keywords {
        let keyword_lower = keyword.trim().to_lowercase();

        let found = if keyword_lower.starts_with('#') {
            let level = leading_hashes(&keyword_lower);
            lines
                .iter()
                .position(|line| line.trim_start().to_lowercase().starts_with(&keyword_lower))
                .map(|index| (index, level))
        } else {
            [2, 3].into_iter().find_map(|level| {
                lines
                    .iter()
                    .position(|line| {
                        heading_level(line).is_some_and(|(found, title)| {
                            found == level && title.to_lowercase().starts_with(&keyword_lower)
                        })
                    })
                    .map(|index| (index, level))
            })
        };

        let Some((heading_index, level)) = found else {
            continue;
        };

        let body: Vec<&str> = lines[heading_index + 1..]
            .iter()
            .take_while(|line| {
                let hashes = leading_hashes(line);
                hashes == 0 || hashes > level
            })
            .copied()
            .collect();

        let body = body.join("\n");
        let body = body.trim();
        if !body.is_empty() {
            return Some(body.to_string());
        }
    }

    None
}

/// Unwraps a response that is fenced in a code block.
///
/// When the trimmed text starts with ```` ``` ````, the lines inside fences are
/// returned trimmed. Any other text is returned unchanged.
pub fn extract_markdown_content(text: &str) -> String {
    if !text.trim_start().starts_with("```") {
        return text.to_string();
    }

    let mut inside = false;
    let mut extracted = String::new();
    for line in text.lines() {
        if line.trim().starts_with("```") {
            inside = !inside;
            continue;
        }
        if inside {
            extracted.push_str(line);
            extracted.push('\n');
        }
    }

    if extracted.trim().is_empty() {
        text.to_string()
    } else {
        extracted.trim().to_string()
    }
}

/// Extracts a generated section from a generator response.
///
/// Text before the `## title` or `### title` heading is dropped. Content
/// without that heading is wrapped under `## title`, and an empty response
/// becomes the heading followed by `placeholder`.
pub fn extract_section_from_response(response: &str, title: &str, placeholder: &str) -> String {
    if response.trim().is_empty() {
        return format!("## {title}\n\n{placeholder}");
    }

    let start = response.lines().position(|line| {
        starts_with_heading(line, title, 2) || starts_with_heading(line, title, 3)
    });

    match start {
        Some(index) => response.lines().skip(index).collect::<Vec<_>>().join("\n"),
        None => format!("## {title}\n\n{response}"),
    }
}

/// Parses `text` and indexes every section by lowercase title.
///
/// When titles repeat, the first section in document order is kept.
pub fn section_map(text: &str) -> HashMap<String, Section> {
    let sections = parse_sections(text);
    let mut map = HashMap::new();
    for section in flatten(&sections) {
        map.entry(section.title.trim().to_lowercase())
            .or_insert_with(|| section.clone());
    }
    map
}
