//! Data stream template reconciliation
//!
//! Every data stream of a package is documented under `## Reference` by a
//! `### <name>` subsection carrying template macros that the package renderer
//! expands later:
//!
//! ```text
//! ## Reference
//!
//! ### audit
//!
//! The `audit` data stream.
//!
//! {{event "audit"}}
//!
//! {{fields "audit"}}
//! ```
//!
//! Macros are matched with any internal whitespace and always written in the
//! compact form shown above.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use docs_meta::DataStreamInfo;
use docs_sections::titles_match;
use regex::Regex;

/// `{{ fields "name" }}` or `{{ event "name" }}` with arbitrary inner whitespace.
static TEMPLATE_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\{\s*(fields|event)\s+"([^"]*)"\s*\}\}"#).unwrap());

static REFERENCE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^##[ \t]+Reference[ \t]*\r?$").unwrap());

/// A `###` heading line, capturing its title.
static SUBSECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###[ \t]+(.+?)[ \t]*\r?$").unwrap());

/// Start of the next `##` or `###` heading.
static SUBSECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{2,3}[ \t]").unwrap());

/// Start of the next `##` heading, excluding deeper levels.
static NEXT_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##[ \t]").unwrap());

/// The kind of a data stream template macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// `{{event "name"}}`: renders the sample event.
    Event,
    /// `{{fields "name"}}`: renders the exported fields table.
    Fields,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Event => "event",
            TemplateKind::Fields => "fields",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compact macro text, e.g. `{{event "audit"}}`.
pub fn template_macro(kind: TemplateKind, name: &str) -> String {
    format!("{{{{{} \"{}\"}}}}", kind.as_str(), name)
}

fn find_template(text: &str, kind: TemplateKind, name: &str) -> Option<Range<usize>> {
    TEMPLATE_MACRO.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        (&caps[1] == kind.as_str() && &caps[2] == name).then(|| whole.range())
    })
}

pub fn has_fields_template(text: &str, name: &str) -> bool {
    find_template(text, TemplateKind::Fields, name).is_some()
}

pub fn has_event_template(text: &str, name: &str) -> bool {
    find_template(text, TemplateKind::Event, name).is_some()
}

/// Checks for a `## Reference` heading (case-insensitive).
pub fn has_reference_section(text: &str) -> bool {
    REFERENCE_HEADING.is_match(text)
}

/// Byte range of the first `### name` heading line, without its newline.
fn find_subsection_heading(text: &str, name: &str) -> Option<Range<usize>> {
    SUBSECTION_HEADING.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        titles_match(&caps[1], name).then(|| whole.range())
    })
}

/// Checks for a `### name` heading with exactly that title (case-insensitive).
pub fn has_data_stream_subsection(text: &str, name: &str) -> bool {
    find_subsection_heading(text, name).is_some()
}

/// Offset where the body of the `### name` subsection ends: the start of the
/// next `##`/`###` heading, or the end of the text.
fn subsection_end(text: &str, name: &str) -> Option<usize> {
    let heading = find_subsection_heading(text, name)?;
    Some(
        SUBSECTION_BOUNDARY
            .find_at(text, heading.end)
            .map_or(text.len(), |m| m.start()),
    )
}

/// Places `block` at `pos` with exactly one blank line on either side.
/// Trailing whitespace before `pos` is dropped.
fn insert_at_end(text: &str, pos: usize, block: &str) -> String {
    let before = text[..pos].trim_end();
    let after = text[pos..].trim_start_matches([' ', '\t']);
    if after.is_empty() {
        format!("{before}\n\n{block}\n")
    } else {
        format!("{before}\n\n{block}\n\n{after}")
    }
}

/// Adds `{{fields "name"}}` at the end of the `### name` subsection, creating
/// the subsection under `## Reference` when it does not exist.
pub fn insert_fields_template(text: &str, name: &str) -> String {
    match subsection_end(text, name) {
        Some(end) => insert_at_end(text, end, &template_macro(TemplateKind::Fields, name)),
        None => append_data_stream_subsection(text, name, false, true),
    }
}

/// Adds `{{event "name"}}` right before `{{fields "name"}}` when that exists,
/// otherwise at the end of the `### name` subsection. A missing subsection is
/// created with the event macro, plus the fields macro unless one exists.
pub fn insert_event_template(text: &str, name: &str) -> String {
    let fields = find_template(text, TemplateKind::Fields, name);
    let Some(end) = subsection_end(text, name) else {
        return append_data_stream_subsection(text, name, true, fields.is_none());
    };

    let event = template_macro(TemplateKind::Event, name);
    match fields {
        Some(fields) => format!("{}{event}\n\n{}", &text[..fields.start], &text[fields.start..]),
        None => insert_at_end(text, end, &event),
    }
}

/// Removes every `{{event "name"}}` macro along with the blank lines around
/// it, leaving a single blank line in its place.
pub fn remove_event_template(text: &str, name: &str) -> String {
    let mut content = text.to_string();
    while let Some(range) = find_template(&content, TemplateKind::Event, name) {
        let before = content[..range.start].trim_end();
        let after = content[range.end..].trim_start();
        content = if before.is_empty() {
            after.to_string()
        } else if after.is_empty() {
            format!("{before}\n")
        } else {
            format!("{before}\n\n{after}")
        };
    }
    content
}

/// Appends a `### name` subsection at the end of `## Reference`, right before
/// the next `##` heading or at the end of the text.
///
/// Without a `## Reference` heading the text is returned unchanged.
pub fn append_data_stream_subsection(
    text: &str,
    name: &str,
    needs_event: bool,
    needs_fields: bool,
) -> String {
    let Some(reference) = REFERENCE_HEADING.find(text) else {
        tracing::debug!(data_stream = name, "No Reference section, subsection not added");
        return text.to_string();
    };

    let insert_pos = NEXT_H2
        .find_at(text, reference.end())
        .map_or(text.len(), |m| m.start());

    let mut parts = vec![format!("### {name}"), format!("The `{name}` data stream.")];
    if needs_event {
        parts.push(template_macro(TemplateKind::Event, name));
    }
    if needs_fields {
        parts.push(template_macro(TemplateKind::Fields, name));
    }

    insert_at_end(text, insert_pos, &parts.join("\n\n"))
}

/// Reconciles the data stream templates of `text` with `data_streams`.
///
/// Each data stream gets a `{{fields}}` macro; it gets an `{{event}}` macro
/// exactly when it has an example event. Running this on its own output
/// changes nothing. Without a `## Reference` heading, or without data
/// streams, the text is returned unchanged.
pub fn ensure_data_stream_templates(text: &str, data_streams: &[DataStreamInfo]) -> String {
    if data_streams.is_empty() {
        return text.to_string();
    }
    if !has_reference_section(text) {
        tracing::debug!("No Reference section found, skipping template insertion");
        return text.to_string();
    }

    let mut content = text.to_string();
    for ds in data_streams {
        let name = ds.name.as_str();

        if !has_fields_template(&content, name) {
            content = insert_fields_template(&content, name);
            tracing::debug!(data_stream = name, "Added fields template");
        }

        let has_event = has_event_template(&content, name);
        if ds.has_example_event && !has_event {
            content = insert_event_template(&content, name);
            tracing::debug!(data_stream = name, "Added event template");
        } else if !ds.has_example_event && has_event {
            content = remove_event_template(&content, name);
            tracing::debug!(data_stream = name, "Removed event template, no example event");
        }
    }
    content
}
