//! Section tree parsing.
//!
//! Parses headings of level 2 and deeper into a forest of [`Section`] nodes:
//! ```text
//! ## A        -> top-level
//! ### A1      -> child of A
//! #### A1a    -> child of A1
//! ### A2      -> child of A
//! ## B        -> top-level
//! ```
//!
//! The tree is built through an index arena while scanning, then converted
//! into owned nodes bottom-up once every line has been seen. Neither step
//! recurses, so nesting depth is bounded only by the input.

use serde::Serialize;

/// Opening sentinel of a block that must survive regeneration verbatim.
pub const PRESERVE_START: &str = "<!-- PRESERVE START -->";

/// Closing sentinel of a preserve block.
pub const PRESERVE_END: &str = "<!-- PRESERVE END -->";

/// A parsed section of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text without the leading `#`s and surrounding whitespace.
    pub title: String,
    /// Number of `#` characters in the heading, always 2 or more.
    pub level: usize,
    /// Heading line plus the body that precedes the first child heading.
    pub own_content: String,
    /// `own_content` followed by the full content of every child.
    pub full_content: String,
    /// Child sections in document order.
    pub children: Vec<Section>,
    /// 1-based line of the heading.
    pub start_line: usize,
    /// 1-based last line of the section's own content.
    pub end_line: usize,
    /// Whether the own content holds a complete preserve block.
    pub has_preserve_block: bool,
    /// The first preserve block of the own content, markers included.
    pub preserve_content: Option<String>,
}

impl Section {
    /// Top-level sections are `##` headings.
    pub fn is_top_level(&self) -> bool {
        self.level == 2
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Length in bytes of the section including its descendants.
    pub fn content_len(&self) -> usize {
        self.full_content.len()
    }

    /// The heading line as it appears at the top of `own_content`.
    pub fn heading_line(&self) -> &str {
        self.own_content.lines().next().unwrap_or_default()
    }
}

impl AsRef<str> for Section {
    fn as_ref(&self) -> &str {
        &self.full_content
    }
}

/// Returns the level and title of a section heading line.
///
/// A heading is two or more `#` characters (after leading spaces or tabs)
/// followed by a single space. `# Title` is not a section heading.
///
/// # Example
/// ```
/// use docs_sections::heading_level;
///
/// assert_eq!(heading_level("### Inputs used"), Some((3, "Inputs used")));
/// assert_eq!(heading_level("# Title"), None);
/// assert_eq!(heading_level("##NoSpace"), None);
/// ```
pub fn heading_level(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let hashes = trimmed.bytes().take_while(|b| *b == b'#').count();
    if hashes < 2 || trimmed.as_bytes().get(hashes) != Some(&b' ') {
        return None;
    }
    Some((hashes, trimmed[hashes + 1..].trim()))
}

/// Checks if `line` is a heading of exactly `level` whose title equals
/// `title`, ignoring case and surrounding whitespace.
pub fn starts_with_heading(line: &str, title: &str, level: usize) -> bool {
    match heading_level(line) {
        Some((found, found_title)) => {
            found == level && found_title.to_lowercase() == title.trim().to_lowercase()
        }
        None => false,
    }
}

/// Node under construction. Children are arena indices.
struct PendingSection {
    title: String,
    level: usize,
    buffer: String,
    children: Vec<usize>,
    start_line: usize,
    end_line: usize,
    preserve: PreserveCapture,
}

/// Line-based capture of the first preserve block in a section.
#[derive(Default)]
enum PreserveCapture {
    #[default]
    Idle,
    Open(Vec<String>),
    Closed(String),
}

impl PreserveCapture {
    fn feed(&mut self, line: &str) {
        match self {
            PreserveCapture::Idle if line.contains(PRESERVE_START) => {
                if line.contains(PRESERVE_END) {
                    *self = PreserveCapture::Closed(line.to_string());
                } else {
                    *self = PreserveCapture::Open(vec![line.to_string()]);
                }
            }
            PreserveCapture::Open(lines) => {
                lines.push(line.to_string());
                if line.contains(PRESERVE_END) {
                    *self = PreserveCapture::Closed(lines.join("\n"));
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Option<String> {
        match self {
            PreserveCapture::Closed(block) => Some(block),
            _ => None,
        }
    }
}

/// Parses markdown into a forest of top-level sections.
///
/// Never fails. Text before the first heading is not part of any section,
/// and a document without section headings yields an empty forest. A heading
/// with no shallower open ancestor becomes a top-level section, and a heading
/// that skips levels attaches to the nearest open shallower heading.
///
/// # Example
/// ```
/// use docs_sections::parse_sections;
///
/// let doc = "## A\n### A1\n#### A1a\n### A2\n## B\n";
/// let sections = parse_sections(doc);
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].children.len(), 2);
/// assert_eq!(sections[0].children[0].children[0].title, "A1a");
/// ```
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut arena: Vec<PendingSection> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut line_number = 0;

    for line in text.lines() {
        line_number += 1;

        let Some((level, title)) = heading_level(line) else {
            if let Some(&current) = stack.last() {
                let node = &mut arena[current];
                node.buffer.push_str(line);
                node.buffer.push('\n');
                node.preserve.feed(line);
            }
            continue;
        };

        if let Some(&current) = stack.last() {
            arena[current].end_line = line_number - 1;
        }

        while stack.last().is_some_and(|&top| arena[top].level >= level) {
            stack.pop();
        }

        let index = arena.len();
        arena.push(PendingSection {
            title: title.to_string(),
            level,
            buffer: format!("{line}\n"),
            children: Vec::new(),
            start_line: line_number,
            end_line: line_number,
            preserve: PreserveCapture::default(),
        });

        match stack.last() {
            Some(&parent) => arena[parent].children.push(index),
            None => {
                if level > 2 {
                    tracing::debug!(title, level, "heading has no parent, kept at top level");
                }
                roots.push(index);
            }
        }
        stack.push(index);
    }

    if let Some(&current) = stack.last() {
        arena[current].end_line = line_number;
    }

    // Children always sit after their parent in the arena, so a reverse walk
    // finishes every child before the parent that owns it.
    let mut built: Vec<Option<Section>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);
    for (index, pending) in arena.into_iter().enumerate().rev() {
        let children: Vec<Section> = pending
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(build_section(pending, children));
    }

    roots
        .into_iter()
        .filter_map(|index| built[index].take())
        .collect()
}

fn build_section(pending: PendingSection, children: Vec<Section>) -> Section {
    let own_content = pending.buffer;
    let mut full_content = own_content.clone();
    for child in &children {
        append_with_blank_line(&mut full_content, &child.full_content);
    }

    let preserve_content = pending.preserve.finish();
    Section {
        title: pending.title,
        level: pending.level,
        own_content,
        full_content,
        children,
        start_line: pending.start_line,
        end_line: pending.end_line,
        has_preserve_block: preserve_content.is_some(),
        preserve_content,
    }
}

/// Appends `part` so that exactly one blank line separates it from `out`,
/// unless `out` already ends with one.
fn append_with_blank_line(out: &mut String, part: &str) {
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
    }
    out.push_str(part);
}

/// Serializes a forest back into markdown.
pub fn render_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        append_with_blank_line(&mut out, &section.full_content);
    }
    out
}
