//! Structural validation of integration documentation
//!
//! Checks a README against the required-section schema and reports every
//! defect as a [`StructuralIssue`]. Validation never edits the document;
//! [`ensure_document_structure`] is the one entry point that applies a fix.

pub mod audit;
pub mod issue;
pub mod validate;

pub use audit::{audit, check_heading_hierarchy, check_required_subsections};
pub use issue::{IssueKind, StructuralIssue, format_issues};
pub use validate::{ensure_document_structure, validate};
