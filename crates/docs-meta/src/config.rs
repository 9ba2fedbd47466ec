//! Document configuration
//!
//! Every product-specific string the documentation core relies on lives here,
//! so that the wording of the title, the AI notice and the required-section
//! schema can be changed without touching the engine. A `docs.toml` file may
//! override any part of it:
//!
//! ```toml
//! [template]
//! title_format = "{title} Integration for Elastic"
//!
//! [[sections]]
//! name = "Overview"
//! subsections = ["Compatibility", "How it works"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder replaced by the package title in [`DocumentTemplate::title_format`].
pub const TITLE_PLACEHOLDER: &str = "{title}";

fn default_title_format() -> String {
    "{title} Integration for Elastic".to_string()
}

fn default_notice() -> String {
    "> **Note**: This documentation was generated using AI and should be reviewed for accuracy."
        .to_string()
}

/// Canonical document title and disclaimer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// Title text with a `{title}` placeholder for the package title.
    #[serde(default = "default_title_format")]
    pub title_format: String,
    /// AI-generated disclaimer placed right after the title.
    #[serde(default = "default_notice")]
    pub notice: String,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            title_format: default_title_format(),
            notice: default_notice(),
        }
    }
}

impl DocumentTemplate {
    /// The H1 line for a package, e.g. `# Vault Integration for Elastic`.
    pub fn title_line(&self, package_title: &str) -> String {
        format!(
            "# {}",
            self.title_format.replace(TITLE_PLACEHOLDER, package_title.trim())
        )
    }

    /// Checks if `line` is the disclaimer, ignoring surrounding whitespace.
    pub fn is_notice(&self, line: &str) -> bool {
        line.trim() == self.notice.trim()
    }
}

/// A required `##` section and the `###` subsections expected under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSection {
    pub name: String,
    #[serde(default)]
    pub subsections: Vec<String>,
}

impl RequiredSection {
    pub fn new(name: impl Into<String>, subsections: &[&str]) -> Self {
        Self {
            name: name.into(),
            subsections: subsections.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The required sections of an integration README, in order.
pub fn default_required_sections() -> Vec<RequiredSection> {
    vec![
        RequiredSection::new("Overview", &["Compatibility", "How it works"]),
        RequiredSection::new(
            "What data does this integration collect?",
            &["Supported use cases"],
        ),
        RequiredSection::new("What do I need to use this integration?", &[]),
        RequiredSection::new(
            "How do I deploy this integration?",
            &["Agent-based deployment", "Onboard and configure", "Validation"],
        ),
        RequiredSection::new("Troubleshooting", &[]),
        RequiredSection::new("Performance and scaling", &[]),
        RequiredSection::new("Reference", &["Inputs used"]),
    ]
}

/// Document configuration: template strings plus the required-section schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(default)]
    pub template: DocumentTemplate,
    /// Ordered required sections. Replaces the default schema when present.
    #[serde(default = "default_required_sections", rename = "sections")]
    pub required_sections: Vec<RequiredSection>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            template: DocumentTemplate::default(),
            required_sections: default_required_sections(),
        }
    }
}

impl DocsConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::parse(source, PathBuf::from("<content>"))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&source, path.to_path_buf())
    }

    fn parse(source: &str, path: PathBuf) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::InvalidConfig {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if !config.template.title_format.contains(TITLE_PLACEHOLDER) {
            return Err(Error::InvalidConfig {
                path,
                message: format!("title_format must contain {TITLE_PLACEHOLDER}"),
            });
        }

        Ok(config)
    }
}
