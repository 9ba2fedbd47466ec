//! Shared test utilities for the integration-docs workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not each
//! carry their own copy of a README. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`fixtures`]: sample README documents and fragments
//! - [`package`]: [`TestPackage`](package::TestPackage) builder for package directories

pub mod fixtures;
pub mod package;

pub use package::TestPackage;
