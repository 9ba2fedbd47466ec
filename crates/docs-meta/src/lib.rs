//! Package metadata and document schema for integration documentation.
//!
//! This crate holds the read-only inputs of the documentation core: the
//! package record (manifest, data streams, agentless flag) and the document
//! configuration (title format, AI notice, required-section schema).

pub mod config;
pub mod error;
pub mod package;

pub use config::{DocsConfig, DocumentTemplate, RequiredSection, default_required_sections};
pub use error::{Error, Result};
pub use package::{
    DataStreamInfo, DeploymentModeConfig, DeploymentModes, PackageContext, PackageManifest,
    PolicyTemplate,
};
