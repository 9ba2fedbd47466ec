//! Package metadata
//!
//! The subset of an integration package that drives documentation
//! post-processing. It is read from the package directory:
//!
//! ```text
//! <package>/
//!   manifest.yml
//!   data_stream/
//!     audit/
//!       manifest.yml
//!       sample_event.json   <- optional, enables {{event "audit"}}
//!     log/
//!       manifest.yml
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration of a single deployment mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentModeConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Deployment modes declared by a policy template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentModes {
    #[serde(default)]
    pub default: Option<DeploymentModeConfig>,
    #[serde(default)]
    pub agentless: Option<DeploymentModeConfig>,
}

/// A policy template from the package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deployment_modes: Option<DeploymentModes>,
}

impl PolicyTemplate {
    pub fn agentless_enabled(&self) -> bool {
        self.deployment_modes
            .as_ref()
            .and_then(|modes| modes.agentless.as_ref())
            .is_some_and(|agentless| agentless.enabled)
    }
}

/// Top-level package `manifest.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub policy_templates: Vec<PolicyTemplate>,
}

impl PackageManifest {
    /// Parse a manifest from YAML text.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| Error::InvalidManifest {
            path: "<content>".into(),
            message: e.to_string(),
        })
    }

    /// Agentless deployment is enabled when any policy template enables it.
    pub fn agentless_enabled(&self) -> bool {
        self.policy_templates
            .iter()
            .any(PolicyTemplate::agentless_enabled)
    }
}

/// A data stream of the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStreamInfo {
    /// Directory name under `data_stream/`.
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Whether `sample_event.json` exists for this data stream.
    #[serde(default)]
    pub has_example_event: bool,
}

impl DataStreamInfo {
    pub fn new(name: impl Into<String>, has_example_event: bool) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            has_example_event,
        }
    }
}

/// Fields of a data stream `manifest.yml` that are used here.
#[derive(Debug, Default, Deserialize)]
struct DataStreamManifest {
    #[serde(default)]
    title: String,
}

/// Read-only package record consumed by the post-processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageContext {
    #[serde(default)]
    pub manifest: Option<PackageManifest>,
    #[serde(default)]
    pub data_streams: Vec<DataStreamInfo>,
}

impl PackageContext {
    pub fn new(manifest: PackageManifest, data_streams: Vec<DataStreamInfo>) -> Self {
        Self {
            manifest: Some(manifest),
            data_streams,
        }
    }

    /// The package title, if a manifest is present.
    pub fn title(&self) -> Option<&str> {
        self.manifest.as_ref().map(|m| m.title.as_str())
    }

    /// False when there is no manifest.
    pub fn agentless_enabled(&self) -> bool {
        self.manifest
            .as_ref()
            .is_some_and(PackageManifest::agentless_enabled)
    }

    /// Load the package record from a package directory.
    ///
    /// `manifest.yml` is required. Data stream directories without a readable
    /// `manifest.yml` are skipped, and a package without `data_stream/` has no
    /// data streams. Data streams are sorted by name.
    pub fn load(root: &Path) -> Result<Self> {
        let manifest_path = root.join("manifest.yml");
        if !manifest_path.is_file() {
            return Err(Error::ManifestNotFound {
                path: manifest_path,
            });
        }

        let source = fs::read_to_string(&manifest_path).map_err(|e| Error::io(&manifest_path, e))?;
        let manifest: PackageManifest =
            serde_yaml::from_str(&source).map_err(|e| Error::InvalidManifest {
                path: manifest_path.clone(),
                message: e.to_string(),
            })?;

        let data_streams = load_data_streams(root)?;
        tracing::debug!(
            package = %manifest.name,
            data_streams = data_streams.len(),
            "Loaded package context"
        );

        Ok(Self::new(manifest, data_streams))
    }
}

fn load_data_streams(root: &Path) -> Result<Vec<DataStreamInfo>> {
    let dir = root.join("data_stream");
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;
    let mut data_streams = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let manifest_path = path.join("manifest.yml");
        let manifest: DataStreamManifest = match fs::read_to_string(&manifest_path) {
            Ok(source) => match serde_yaml::from_str(&source) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!("Skipping data stream {:?}: {}", path, e);
                    continue;
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                tracing::warn!("Skipping data stream {:?}: {}", path, e);
                continue;
            }
        };

        data_streams.push(DataStreamInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            title: manifest.title,
            has_example_event: path.join("sample_event.json").is_file(),
        });
    }

    data_streams.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(data_streams)
}
