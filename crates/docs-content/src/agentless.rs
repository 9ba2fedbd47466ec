//! Agentless deployment subsection
//!
//! Packages that enable agentless deployment in a policy template document it
//! in an `### Agentless deployment` subsection of the deploy section. The
//! subsection is reconciled with the manifest flag: added when enabled and
//! missing, removed when disabled, and otherwise left untouched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// The canonical agentless subsection.
pub const AGENTLESS_SECTION: &str = "### Agentless deployment

Agentless deployments are only supported in Elastic Serverless and Elastic Cloud environments. Agentless deployments provide a means to ingest data while avoiding the orchestration, management, and maintenance needs associated with standard ingest infrastructure. Using an agentless deployment makes manual agent deployment unnecessary, allowing you to focus on your data instead of the agent that collects it.

For more information, refer to [Agentless integrations](https://www.elastic.co/guide/en/serverless/current/security-agentless-integrations.html) and [Agentless integrations FAQ](https://www.elastic.co/guide/en/serverless/current/agentless-integration-troubleshooting.html).";

static AGENTLESS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^###[ \t]+Agentless deployment[ \t]*\r?$").unwrap());

static AGENT_BASED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^###[ \t]+Agent-based deployment[ \t]*\r?$").unwrap());

static DEPLOY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^##[ \t]+How do I deploy this integration\?[ \t]*\r?$").unwrap()
});

static SUBSECTION_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^###[ \t]").unwrap());

static SUBSECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{2,3}[ \t]").unwrap());

static NEXT_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##[ \t]").unwrap());

pub fn has_agentless_section(text: &str) -> bool {
    AGENTLESS_HEADING.is_match(text)
}

/// Reconciles the agentless subsection with `agentless_enabled`.
///
/// When enabled and missing, the subsection goes right after
/// `### Agent-based deployment`, or before the first subsection of
/// `## How do I deploy this integration?` when there is no agent-based one.
/// Without the deploy heading nothing is added. Removing a subsection this
/// function inserted restores the original text.
pub fn ensure_agentless_section(text: &str, agentless_enabled: bool) -> String {
    if !agentless_enabled {
        return remove_agentless_section(text);
    }

    if has_agentless_section(text) {
        return text.to_string();
    }

    let Some(pos) = insertion_point(text) else {
        tracing::debug!("No deploy section found, agentless section not added");
        return text.to_string();
    };

    tracing::debug!("Added agentless deployment section");
    insert_block(text, pos, AGENTLESS_SECTION)
}

/// Where the agentless subsection belongs, if the deploy section exists.
fn insertion_point(text: &str) -> Option<usize> {
    let deploy = DEPLOY_HEADING.find(text)?;
    let section_end = NEXT_H2
        .find_at(text, deploy.end())
        .map_or(text.len(), |m| m.start());
    let section = deploy.end()..section_end;

    if let Some(agent_based) = find_within(&AGENT_BASED_HEADING, text, &section) {
        return Some(
            SUBSECTION_BOUNDARY
                .find_at(text, agent_based.end)
                .map_or(text.len(), |m| m.start()),
        );
    }

    Some(
        find_within(&SUBSECTION_START, text, &section)
            .map_or(section.end, |m| m.start),
    )
}

fn find_within(pattern: &Regex, text: &str, range: &Range<usize>) -> Option<Range<usize>> {
    pattern
        .find_at(text, range.start)
        .map(|m| m.range())
        .filter(|m| m.start < range.end)
}

/// Inserts `block` at the start of the line at `pos`, followed by a blank line.
///
/// Everything added goes after the block, so cutting the block from its
/// heading to the next heading gives back `text`. The one exception is the
/// end of a text without a final newline, where the block is put after a
/// blank line and left without one.
fn insert_block(text: &str, pos: usize, block: &str) -> String {
    let (before, after) = text.split_at(pos);
    if after.is_empty() && !before.is_empty() && !before.ends_with('\n') {
        return format!("{before}\n\n{block}");
    }
    let tail = if after.is_empty() { "\n" } else { "\n\n" };
    format!("{before}{block}{tail}{after}")
}

/// Removes every agentless subsection: its heading and body up to the next
/// `##`/`###` heading. A subsection that ends the text without a final
/// newline also takes the line breaks before it.
fn remove_agentless_section(text: &str) -> String {
    let mut content = text.to_string();
    while let Some(heading) = AGENTLESS_HEADING.find(&content) {
        let start = heading.start();
        let end = SUBSECTION_BOUNDARY
            .find_at(&content, heading.end())
            .map(|m| m.start());

        content = match end {
            Some(end) => format!("{}{}", &content[..start], &content[end..]),
            None if content.ends_with('\n') => content[..start].to_string(),
            None => content[..start].trim_end_matches(['\r', '\n']).to_string(),
        };
        tracing::debug!("Removed agentless deployment section");
    }
    content
}
