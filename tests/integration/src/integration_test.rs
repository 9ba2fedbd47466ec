//! End-to-end test of finalizing a package README from disk
//!
//! This test exercises the complete flow: package loading -> finalization ->
//! audit, against the `hashicorp_vault` package under `test-fixtures/`.

use docs_content::AGENTLESS_SECTION;
use docs_engine::Finalizer;
use docs_meta::{DocsConfig, PackageContext};
use docs_sections::preserved_blocks_kept;
use docs_structure::{IssueKind, audit};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

fn vault_package() -> PathBuf {
    fixtures_dir().join("packages/hashicorp_vault")
}

fn stale_readme() -> String {
    fs::read_to_string(vault_package().join("docs/README.md")).unwrap()
}

/// What the fixture README must look like once finalized.
fn expected_readme() -> String {
    format!(
        r#"# Hashicorp Vault Integration for Elastic

> **Note**: This documentation was generated using AI and should be reviewed for accuracy.

## Overview

The Hashicorp Vault integration collects audit and operational logs.

## What data does this integration collect?

Audit events and operational logs.

## What do I need to use this integration?

A running Vault server with an audit device enabled.

## How do I deploy this integration?

### Agent-based deployment

Install Elastic Agent on a host that can read the Vault audit log.

{AGENTLESS_SECTION}

### Onboard and configure

Enable the file audit device.

## Troubleshooting

<!-- PRESERVE START -->
Known issue: the audit socket drops events under heavy load.
<!-- PRESERVE END -->

Check the Elastic Agent logs.

## Performance and scaling

A single agent handles most deployments.

## Reference

### audit

The `audit` data stream.

{{{{event "audit"}}}}

{{{{ fields "audit" }}}}

### log

The `log` data stream.

{{{{fields "log"}}}}
"#
    )
}

#[test]
fn test_fixture_package_loads() {
    let ctx = PackageContext::load(&vault_package()).unwrap();

    assert_eq!(ctx.title(), Some("Hashicorp Vault"));
    assert!(ctx.agentless_enabled());

    let streams: Vec<(&str, bool)> = ctx
        .data_streams
        .iter()
        .map(|ds| (ds.name.as_str(), ds.has_example_event))
        .collect();
    assert_eq!(streams, vec![("audit", true), ("log", false)]);
    assert_eq!(ctx.data_streams[0].title, "Hashicorp Vault audit logs");
}

#[test]
fn test_finalize_fixture_readme() {
    let ctx = PackageContext::load(&vault_package()).unwrap();
    let original = stale_readme();

    let doc = Finalizer::default().finalize(&original, &ctx);

    assert_eq!(doc.content, expected_readme());
    assert!(doc.is_valid(), "unexpected issues:\n{}", doc.issues_summary());
    assert!(preserved_blocks_kept(&original, &doc.content));
}

#[test]
fn test_finalize_fixture_readme_report() {
    let ctx = PackageContext::load(&vault_package()).unwrap();
    let doc = Finalizer::default().finalize(&stale_readme(), &ctx);

    assert!(!doc.report.is_unchanged());
    assert!(doc.report.removed_lines >= 2);
    assert!(doc.report.similarity > 0.5 && doc.report.similarity < 1.0);
    assert!(doc.report.unified_diff.contains("-# Vault\n"));
    assert!(doc.report.unified_diff.contains("-{{event \"log\"}}\n"));
    assert!(doc.report.unified_diff.contains("+{{event \"audit\"}}\n"));
    assert!(doc.report.unified_diff.contains("+### Agentless deployment\n"));
}

#[test]
fn test_finalized_fixture_is_stable() {
    let ctx = PackageContext::load(&vault_package()).unwrap();
    let finalizer = Finalizer::default();

    let first = finalizer.finalize(&stale_readme(), &ctx);
    let second = finalizer.finalize(&first.content, &ctx);

    assert_eq!(second.content, first.content);
    assert!(second.report.is_unchanged());
}

#[test]
fn test_fixture_audit_reports_missing_subsections() {
    let ctx = PackageContext::load(&vault_package()).unwrap();
    let doc = Finalizer::default().finalize(&stale_readme(), &ctx);

    let issues = audit(&doc.content, "Hashicorp Vault", &DocsConfig::default());
    let locations: Vec<&str> = issues.iter().map(|i| i.location.as_str()).collect();

    assert!(issues.iter().all(|i| i.kind == IssueKind::Missing));
    assert_eq!(
        locations,
        vec![
            "## Overview",
            "## Overview",
            "## What data does this integration collect?",
            "## How do I deploy this integration?",
            "## Reference",
        ]
    );
    assert!(issues[3].message.contains("'### Validation'"));
}

#[test]
fn test_custom_config_from_fixture() {
    let ctx = PackageContext::load(&vault_package()).unwrap();
    let finalizer = Finalizer::from_config_file(&fixtures_dir().join("docs.toml")).unwrap();

    let doc = finalizer.finalize(&stale_readme(), &ctx);

    assert!(doc.content.starts_with(
        "# Hashicorp Vault integration\n\n> Generated documentation. Review before publishing.\n\n## Overview\n"
    ));
    assert!(doc.is_valid());
    assert!(audit(&doc.content, "Hashicorp Vault", finalizer.config()).is_empty());
}

#[test]
fn test_finalize_without_agentless_removes_subsection() {
    let ctx = PackageContext::load(&vault_package()).unwrap();
    let finalizer = Finalizer::default();
    let with_agentless = finalizer.finalize(&stale_readme(), &ctx).content;

    let mut manifest = ctx.manifest.clone().unwrap();
    manifest.policy_templates.clear();
    let without = PackageContext::new(manifest, ctx.data_streams.clone());

    let doc = finalizer.finalize(&with_agentless, &without);

    assert!(!doc.content.contains("### Agentless deployment"));
    assert!(doc.content.contains(
        "Vault audit log.\n\n### Onboard and configure\n"
    ));
    assert_eq!(
        doc.content,
        with_agentless.replace(&format!("{AGENTLESS_SECTION}\n\n"), "")
    );
}
