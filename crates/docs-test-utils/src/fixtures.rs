//! Sample documents shared by the crate test suites.
//!
//! The README fixtures follow the default required-section schema. Each one
//! ends with exactly one trailing newline.

/// The canonical title for the `Hashicorp Vault` test package.
pub const VAULT_TITLE_LINE: &str = "# Hashicorp Vault Integration for Elastic";

/// The default AI-generated disclaimer.
pub const NOTICE: &str =
    "> **Note**: This documentation was generated using AI and should be reviewed for accuracy.";

/// A README that passes every structural check and already carries the
/// templates for an `audit` (with example event) and a `log` data stream.
pub const WELL_FORMED_README: &str = r#"# Hashicorp Vault Integration for Elastic

> **Note**: This documentation was generated using AI and should be reviewed for accuracy.

## Overview

The Hashicorp Vault integration collects audit and operational logs.

### Compatibility

Tested with Vault 1.11 and later.

### How it works

Elastic Agent reads the audit log from a file or a socket.

## What data does this integration collect?

Audit events and operational logs.

### Supported use cases

Security auditing of secret access.

## What do I need to use this integration?

A running Vault server with an audit device enabled.

## How do I deploy this integration?

### Agent-based deployment

Install Elastic Agent on a host that can read the Vault audit log.

### Onboard and configure

Enable the file audit device.

### Validation

Open the Vault dashboards in Kibana.

## Troubleshooting

Check the Elastic Agent logs.

## Performance and scaling

A single agent handles most deployments.

## Reference

### Inputs used

Filestream and TCP.

### audit

The `audit` data stream.

{{event "audit"}}

{{fields "audit"}}

### log

The `log` data stream.

{{fields "log"}}
"#;

/// A README missing `## Troubleshooting` that repeats `## Overview`.
pub const README_WITH_DEFECTS: &str = r#"# Hashicorp Vault Integration for Elastic

> **Note**: This documentation was generated using AI and should be reviewed for accuracy.

## Overview

First overview.

## What data does this integration collect?

Audit events.

## Overview

Second overview.

## What do I need to use this integration?

Vault.

## How do I deploy this integration?

Install the agent.

## Performance and scaling

Fine.

## Reference

Fields.
"#;

/// A raw generator draft: no title, no notice, no templates.
pub const GENERATED_DRAFT: &str = r#"## Overview

The Hashicorp Vault integration collects audit logs.

## How do I deploy this integration?

### Agent-based deployment

Install Elastic Agent.

### Onboard and configure

Enable the audit device.

## Reference

### Inputs used

Filestream.
"#;

/// `## Reference` holding only `### log`, followed by `## Troubleshooting`.
pub const REFERENCE_BEFORE_TROUBLESHOOTING: &str = r#"## Reference

### log

The `log` data stream.

## Troubleshooting

Check the agent logs.
"#;

/// A deploy section with an agent-based subsection and no agentless one.
pub const DEPLOY_SECTION: &str = r#"## How do I deploy this integration?

### Agent-based deployment

Install Elastic Agent on a host that can read the Vault audit log.

### Set up steps in Vault

Enable the file audit device.

## Troubleshooting

Check the agent logs.
"#;

/// A nested outline with one branch three levels deep.
pub const NESTED_OUTLINE: &str = "## A\n### A1\n#### A1a\n### A2\n## B\n";

/// A section with a preserve block that must survive regeneration.
pub const PRESERVED_SECTION: &str = r#"## Troubleshooting

<!-- PRESERVE START -->
Known issue: audit socket drops events under load.
<!-- PRESERVE END -->

Check the agent logs.
"#;
