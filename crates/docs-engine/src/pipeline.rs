//! Finalization pipeline
//!
//! Finalizing a generated README runs, in order:
//!
//! 1. title and AI notice enforcement
//! 2. agentless subsection reconciliation
//! 3. data stream template reconciliation
//! 4. structural validation, without title issues
//!
//! Agentless reconciliation may remove a subsection together with anything
//! written inside it, so it runs before the templates are reconciled.

use std::path::Path;

use docs_content::{
    combine_sections, ensure_agentless_section, ensure_data_stream_templates,
    ensure_document_title,
};
use docs_meta::{DocsConfig, PackageContext};
use docs_sections::{Section, parse_sections};
use docs_structure::{IssueKind, StructuralIssue, format_issues, validate};

use crate::report::ChangeReport;

/// The outcome of finalizing a document.
#[derive(Debug, Clone)]
pub struct FinalizedDocument {
    /// The corrected document.
    pub content: String,
    /// Structural issues that remain after every automatic fix.
    pub issues: Vec<StructuralIssue>,
    /// What the pipeline changed.
    pub report: ChangeReport,
}

impl FinalizedDocument {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The remaining issues as a numbered list.
    pub fn issues_summary(&self) -> String {
        format_issues(&self.issues)
    }

    /// The section tree of the corrected document.
    pub fn sections(&self) -> Vec<Section> {
        parse_sections(&self.content)
    }
}

/// Applies every automatic fix to generated documentation.
#[derive(Debug, Clone, Default)]
pub struct Finalizer {
    config: DocsConfig,
}

impl Finalizer {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    /// Create a finalizer from a `docs.toml` file.
    pub fn from_config_file(path: &Path) -> docs_meta::Result<Self> {
        DocsConfig::load(path).map(Self::new)
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Finalizes a complete document for `ctx`.
    ///
    /// Without a package manifest the title is left as is and no agentless
    /// subsection is kept. Finalizing the returned content again changes
    /// nothing.
    pub fn finalize(&self, text: &str, ctx: &PackageContext) -> FinalizedDocument {
        let mut content = match ctx.title() {
            Some(title) => ensure_document_title(text, title, &self.config.template),
            None => {
                tracing::debug!("No package manifest, document title not enforced");
                text.to_string()
            }
        };

        content = ensure_agentless_section(&content, ctx.agentless_enabled());
        content = ensure_data_stream_templates(&content, &ctx.data_streams);

        let issues: Vec<StructuralIssue> =
            validate(&content, ctx.title().unwrap_or_default(), &self.config)
                .into_iter()
                .filter(|issue| issue.kind != IssueKind::Title)
                .collect();

        let report = ChangeReport::between(text, &content);
        tracing::info!(
            changed_lines = report.inserted_lines + report.removed_lines,
            issues = issues.len(),
            "Finalized document"
        );

        FinalizedDocument {
            content,
            issues,
            report,
        }
    }

    /// Combines independently generated sections and finalizes the result.
    ///
    /// The change report compares the plain concatenation of the sections
    /// with the finalized document.
    pub fn assemble<S: AsRef<str>>(&self, sections: &[S], ctx: &PackageContext) -> FinalizedDocument {
        let combined = combine_sections(sections, &self.config.template);
        let mut document = self.finalize(&combined, ctx);

        let raw: String = sections.iter().map(|s| s.as_ref()).collect();
        document.report = ChangeReport::between(&raw, &document.content);
        document
    }
}
