//! Documentation workflow tests
//!
//! These tests follow a README through the steps a documentation run takes:
//! parse the existing document, regenerate sections, reassemble them and
//! finalize the result against the package on disk.

use docs_content::{combine, has_agentless_section};
use docs_engine::Finalizer;
use docs_meta::{DocsConfig, PackageContext};
use docs_sections::{
    Section, extract_markdown_content, extract_preserve_blocks, extract_section_by_keyword,
    extract_section_from_response, find_by_title, find_by_title_recursive, find_parent, flatten,
    parse_sections, preserved_blocks_kept, render_sections, section_map,
};
use docs_structure::{IssueKind, validate};
use docs_test_utils::TestPackage;
use docs_test_utils::fixtures::{
    GENERATED_DRAFT, PRESERVED_SECTION, README_WITH_DEFECTS, VAULT_TITLE_LINE, WELL_FORMED_README,
};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn vault_package() -> TestPackage {
    TestPackage::new("hashicorp_vault", "Hashicorp Vault")
        .with_agentless()
        .with_data_stream("audit", true)
        .with_data_stream("log", false)
}

/// Replaces the top-level section titled `title` and returns the parts in
/// document order.
fn replace_section(sections: &[Section], title: &str, replacement: &str) -> Vec<String> {
    sections
        .iter()
        .map(|section| {
            if section.title == title {
                replacement.to_string()
            } else {
                section.full_content.clone()
            }
        })
        .collect()
}

// =============================================================================
// Parsing and lookup
// =============================================================================

#[test]
fn test_existing_readme_round_trips_through_sections() {
    let sections = parse_sections(WELL_FORMED_README);
    let body = WELL_FORMED_README
        .split_once("## Overview")
        .map(|(_, rest)| format!("## Overview{rest}"))
        .unwrap();

    assert_eq!(sections.len(), 7);
    assert_eq!(render_sections(&sections), body);
}

#[test]
fn test_lookup_by_partial_title() {
    let sections = parse_sections(WELL_FORMED_README);

    let deploy = find_by_title(&sections, "deploy").unwrap();
    assert_eq!(deploy.title, "How do I deploy this integration?");

    let inputs = find_by_title_recursive(&sections, "Inputs used").unwrap();
    assert_eq!(inputs.level, 3);
    assert_eq!(find_parent(&sections, "Inputs used").unwrap().title, "Reference");

    let titles: Vec<&str> = flatten(&sections).iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles.first(), Some(&"Overview"));
    assert_eq!(titles.last(), Some(&"log"));
}

#[test]
fn test_section_map_indexes_subsections() {
    let map = section_map(WELL_FORMED_README);

    assert!(map.contains_key("troubleshooting"));
    assert!(map["audit"].full_content.contains("{{event \"audit\"}}"));
    assert_eq!(map["reference"].children.len(), 3);
}

// =============================================================================
// Section regeneration
// =============================================================================

#[test]
fn test_regenerated_section_keeps_preserve_blocks() {
    let package = vault_package();
    package.write_file("docs/README.md", WELL_FORMED_README);
    let existing = package.read_file("docs/README.md");
    let ctx = PackageContext::load(package.root()).unwrap();

    let existing = existing.replace(
        "Check the Elastic Agent logs.\n",
        &PRESERVED_SECTION.replace("## Troubleshooting\n\n", ""),
    );
    let sections = parse_sections(&existing);
    let old = find_by_title(&sections, "Troubleshooting").unwrap();
    assert!(old.has_preserve_block);

    let response = "```markdown\nHere is the updated section.\n\n## Troubleshooting\n\nRestart the agent after changing the audit device.\n```";
    let regenerated = extract_section_from_response(
        &extract_markdown_content(response),
        "Troubleshooting",
        "Troubleshooting content will be added later.",
    );
    assert_eq!(
        regenerated,
        "## Troubleshooting\n\nRestart the agent after changing the audit device."
    );
    assert!(!preserved_blocks_kept(&old.full_content, &regenerated));

    let mut restored = regenerated;
    for block in extract_preserve_blocks(&old.full_content) {
        restored.push_str("\n\n");
        restored.push_str(&block);
    }

    let parts = replace_section(&sections, "Troubleshooting", &restored);
    let doc = Finalizer::default().assemble(&parts, &ctx);

    assert!(preserved_blocks_kept(&existing, &doc.content));
    assert!(doc.content.contains("Restart the agent after changing the audit device."));
    assert!(doc.content.starts_with(VAULT_TITLE_LINE));
    assert!(doc.is_valid(), "unexpected issues:\n{}", doc.issues_summary());
}

#[test]
fn test_empty_response_becomes_placeholder_section() {
    let package = vault_package();
    let ctx = PackageContext::load(package.root()).unwrap();
    let sections = parse_sections(WELL_FORMED_README);

    let placeholder = extract_section_from_response("  \n", "Performance and scaling", "TBD.");
    assert_eq!(placeholder, "## Performance and scaling\n\nTBD.");

    let parts = replace_section(&sections, "Performance and scaling", &placeholder);
    let doc = Finalizer::default().assemble(&parts, &ctx);

    assert!(doc.content.contains("## Performance and scaling\n\nTBD.\n\n## Reference\n"));
    assert!(doc.is_valid());
}

#[test]
fn test_sections_returned_with_titles_are_combined_once() {
    let package = vault_package();
    let ctx = PackageContext::load(package.root()).unwrap();

    let parts: Vec<String> = parse_sections(WELL_FORMED_README)
        .iter()
        .map(|section| {
            format!(
                "{VAULT_TITLE_LINE}\n\n{}\n\n{}",
                DocsConfig::default().template.notice,
                section.full_content
            )
        })
        .collect();

    let doc = Finalizer::default().assemble(&parts, &ctx);

    assert_eq!(doc.content.matches(VAULT_TITLE_LINE).count(), 1);
    assert_eq!(doc.content.matches("> **Note**").count(), 1);
    assert!(has_agentless_section(&doc.content));
}

#[test]
fn test_keyword_extraction_from_existing_readme() {
    let body = extract_section_by_keyword(WELL_FORMED_README, &["Missing section", "Troubleshooting"]);
    assert_eq!(body.as_deref(), Some("Check the Elastic Agent logs."));

    let subsection = extract_section_by_keyword(WELL_FORMED_README, &["### Compat"]);
    assert_eq!(subsection.as_deref(), Some("Tested with Vault 1.11 and later."));
}

// =============================================================================
// Finalization against a package on disk
// =============================================================================

#[test]
fn test_generated_draft_written_back_is_stable() {
    let package = vault_package();
    package.write_file("docs/README.md", GENERATED_DRAFT);
    let ctx = PackageContext::load(package.root()).unwrap();
    let finalizer = Finalizer::default();

    let first = finalizer.finalize(&package.read_file("docs/README.md"), &ctx);
    package.write_file("docs/README.md", &first.content);
    let second = finalizer.finalize(&package.read_file("docs/README.md"), &ctx);

    assert!(second.report.is_unchanged());
    assert!(first.content.contains("{{event \"audit\"}}\n\n{{fields \"audit\"}}"));
    assert!(first.content.contains("{{fields \"log\"}}"));
    assert!(!first.content.contains("{{event \"log\"}}"));

    let missing: Vec<&str> = first
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::Missing)
        .map(|issue| issue.location.as_str())
        .collect();
    assert_eq!(
        missing,
        vec![
            "## What data does this integration collect?",
            "## What do I need to use this integration?",
            "## Troubleshooting",
            "## Performance and scaling",
        ]
    );
}

#[test]
fn test_defective_readme_keeps_manual_issues() {
    let package = vault_package();
    let ctx = PackageContext::load(package.root()).unwrap();

    let doc = Finalizer::default().finalize(README_WITH_DEFECTS, &ctx);
    let summary = doc.issues_summary();

    assert!(!doc.is_valid());
    assert!(summary.contains("[missing] Required section '## Troubleshooting' is missing"));
    assert!(summary.contains("[duplicate] Section '## Overview' appears 2 times"));
    assert!(doc.issues.iter().all(|issue| issue.kind != IssueKind::Title));
}

#[test]
fn test_validate_before_and_after_finalization() {
    let package = vault_package();
    let ctx = PackageContext::load(package.root()).unwrap();
    let config = DocsConfig::default();

    let before = validate(GENERATED_DRAFT, "Hashicorp Vault", &config);
    assert!(before.iter().any(|issue| issue.kind == IssueKind::Title));

    let doc = Finalizer::new(config.clone()).finalize(GENERATED_DRAFT, &ctx);
    let after = validate(&doc.content, "Hashicorp Vault", &config);
    assert!(after.iter().all(|issue| issue.kind != IssueKind::Title));
    assert_eq!(after.len(), doc.issues.len());
}

#[test]
fn test_combine_matches_engine_assembly() {
    let package = vault_package();
    let ctx = PackageContext::load(package.root()).unwrap();
    let sections = parse_sections(WELL_FORMED_README);

    let combined = combine(&sections, "Hashicorp Vault", &DocsConfig::default().template);
    let doc = Finalizer::default().assemble(&sections, &ctx);

    assert_eq!(
        doc.content,
        Finalizer::default().finalize(&combined, &ctx).content
    );
}
