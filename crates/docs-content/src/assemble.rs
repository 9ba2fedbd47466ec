//! Document assembly
//!
//! Sections are generated independently, so each one may come back with its
//! own copy of the document title or the AI notice. Assembly strips those
//! preambles and writes the title and notice exactly once.

use docs_meta::DocumentTemplate;

fn is_h1(line: &str) -> bool {
    let line = line.trim_start();
    line == "#" || line.starts_with("# ")
}

/// Drops leading H1 lines, notice lines and blank lines from `text`.
pub fn strip_preamble(text: &str, template: &DocumentTemplate) -> String {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() || is_h1(line) || template.is_notice(line) {
            offset += line.len();
        } else {
            break;
        }
    }
    text[offset..].to_string()
}

/// Joins section contents with one blank line between them.
///
/// Each part is stripped of its preamble and trailing whitespace; parts left
/// empty are skipped. A non-empty result ends with exactly one newline.
pub fn combine_sections<S: AsRef<str>>(sections: &[S], template: &DocumentTemplate) -> String {
    let parts: Vec<String> = sections
        .iter()
        .map(|section| strip_preamble(section.as_ref(), template).trim_end().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return String::new();
    }

    let mut combined = parts.join("\n\n");
    combined.push('\n');
    combined
}

/// Combines sections under the canonical title and notice for `package_title`.
///
/// # Example
/// ```
/// use docs_content::combine;
/// use docs_meta::DocumentTemplate;
///
/// let template = DocumentTemplate::default();
/// let doc = combine(&["## Overview\n\nText.\n", "# Stray\n\n## Reference\n"], "Vault", &template);
/// assert!(doc.starts_with("# Vault Integration for Elastic\n\n> **Note**"));
/// assert!(doc.ends_with("## Overview\n\nText.\n\n## Reference\n"));
/// ```
pub fn combine<S: AsRef<str>>(
    sections: &[S],
    package_title: &str,
    template: &DocumentTemplate,
) -> String {
    ensure_document_title(&combine_sections(sections, template), package_title, template)
}

/// Makes `text` start with the canonical title line, a blank line and the
/// notice.
///
/// A document already in that shape is returned unchanged. Otherwise any
/// leading H1, notice and blank lines are replaced by the canonical preamble.
pub fn ensure_document_title(
    text: &str,
    package_title: &str,
    template: &DocumentTemplate,
) -> String {
    let title_line = template.title_line(package_title);
    let mut lines = text.lines();

    let has_title = lines.next().is_some_and(|line| line.trim() == title_line);
    let has_gap = lines.next().is_some_and(|line| line.trim().is_empty());
    let has_notice = lines.next().is_some_and(|line| template.is_notice(line));
    if has_title && has_gap && has_notice {
        return text.to_string();
    }

    let body = strip_preamble(text, template);
    let mut out = format!("{title_line}\n\n{}\n", template.notice.trim());
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    tracing::debug!(title = %title_line, "Rewrote document title");
    out
}
