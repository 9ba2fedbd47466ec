//! Document finalization pipeline for integration documentation
//!
//! Ties the section model, the post-processor and the validator together:
//! a generated README goes in, a corrected README and its remaining
//! structural issues come out.
//!
//! ```
//! use docs_engine::Finalizer;
//! use docs_meta::{DataStreamInfo, PackageContext, PackageManifest};
//!
//! let ctx = PackageContext::new(
//!     PackageManifest { title: "Vault".into(), ..Default::default() },
//!     vec![DataStreamInfo::new("audit", true)],
//! );
//! let doc = Finalizer::default().finalize("## Reference\n", &ctx);
//! assert!(doc.content.starts_with("# Vault Integration for Elastic"));
//! assert!(doc.content.contains("{{event \"audit\"}}\n\n{{fields \"audit\"}}"));
//! ```

pub mod logging;
pub mod pipeline;
pub mod report;

pub use pipeline::{FinalizedDocument, Finalizer};
pub use report::ChangeReport;
