//! [`TestPackage`] builder for integration package directories.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary integration package directory.
///
/// # Example
///
/// ```rust,no_run
/// use docs_test_utils::TestPackage;
///
/// let package = TestPackage::new("vault", "Hashicorp Vault")
///     .with_agentless()
///     .with_data_stream("audit", true)
///     .with_data_stream("log", false);
/// package.assert_file_exists("data_stream/audit/sample_event.json");
/// ```
pub struct TestPackage {
    temp_dir: TempDir,
    name: String,
    title: String,
    agentless: bool,
}

impl TestPackage {
    /// Create a package directory with a `manifest.yml` and no data streams.
    pub fn new(name: &str, title: &str) -> Self {
        let package = Self {
            temp_dir: TempDir::new().unwrap(),
            name: name.to_string(),
            title: title.to_string(),
            agentless: false,
        };
        package.write_manifest();
        package
    }

    /// Return the root path of the package directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Rewrite the manifest with an agentless-enabled policy template.
    pub fn with_agentless(mut self) -> Self {
        self.agentless = true;
        self.write_manifest();
        self
    }

    /// Add `data_stream/<name>/manifest.yml`, plus `sample_event.json` when
    /// `with_event` is set.
    pub fn with_data_stream(self, name: &str, with_event: bool) -> Self {
        let dir = self.root().join("data_stream").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("manifest.yml"),
            format!("title: \"{} {name} logs\"\ntype: logs\n", self.title),
        )
        .unwrap();
        if with_event {
            fs::write(
                dir.join("sample_event.json"),
                format!("{{\"data_stream\": {{\"dataset\": \"{}.{name}\"}}}}\n", self.name),
            )
            .unwrap();
        }
        self
    }

    /// Write `contents` to `path` relative to the package root.
    pub fn write_file(&self, path: &str, contents: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, contents).unwrap();
    }

    /// Read the file at `path` relative to the package root.
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the package root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    fn write_manifest(&self) {
        let mut manifest = format!(
            "format_version: 3.0.0\nname: {}\ntitle: \"{}\"\nversion: 1.4.0\ntype: integration\npolicy_templates:\n  - name: {}\n    title: \"{}\"\n",
            self.name, self.title, self.name, self.title
        );
        if self.agentless {
            manifest.push_str(
                "    deployment_modes:\n      default:\n        enabled: true\n      agentless:\n        enabled: true\n",
            );
        }
        fs::write(self.root().join("manifest.yml"), manifest).unwrap();
    }
}
