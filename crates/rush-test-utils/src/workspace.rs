//! [`TestWorkspace`] builder for Rush monorepo test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fixtures;

/// A project entry written into the generated `rush.json`.
#[derive(Debug, Clone)]
pub struct TestProject {
    pub package_name: String,
    pub project_folder: String,
    pub review_category: Option<String>,
}

/// A temporary Rush monorepo with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use rush_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new()
///     .review_categories(&["production"])
///     .project_in_category("@acme/web", "apps/web", "production")
///     .build();
/// ws.assert_file_exists("rush.json");
/// ws.assert_file_exists("apps/web/package.json");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
    rush_version: Option<String>,
    review_categories: Vec<String>,
    projects: Vec<TestProject>,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// An empty temporary directory; nothing is written until [`build`](Self::build).
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            rush_version: Some("5.82.0".to_string()),
            review_categories: Vec::new(),
            projects: Vec::new(),
        }
    }

    /// A workspace holding [`fixtures::RUSH_JSON`] and its project folders.
    pub fn standard() -> Self {
        let ws = Self::new();
        ws.write("rush.json", fixtures::RUSH_JSON);
        for folder in fixtures::RUSH_JSON_FOLDERS {
            fs::create_dir_all(ws.root().join(folder)).unwrap();
        }
        ws
    }

    pub fn rush_version(mut self, version: &str) -> Self {
        self.rush_version = Some(version.to_string());
        self
    }

    /// Omit `rushVersion` from the generated file.
    pub fn without_rush_version(mut self) -> Self {
        self.rush_version = None;
        self
    }

    pub fn review_categories(mut self, categories: &[&str]) -> Self {
        self.review_categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn project(mut self, package_name: &str, project_folder: &str) -> Self {
        self.projects.push(TestProject {
            package_name: package_name.to_string(),
            project_folder: project_folder.to_string(),
            review_category: None,
        });
        self
    }

    pub fn project_in_category(
        mut self,
        package_name: &str,
        project_folder: &str,
        category: &str,
    ) -> Self {
        self.projects.push(TestProject {
            package_name: package_name.to_string(),
            project_folder: project_folder.to_string(),
            review_category: Some(category.to_string()),
        });
        self
    }

    /// Write `rush.json` and a `package.json` in every project folder.
    ///
    /// A project added with an empty folder gets no `projectFolder` key.
    pub fn build(self) -> Self {
        self.write("rush.json", &self.render_rush_json());
        for project in self.projects.iter().filter(|p| !p.project_folder.is_empty()) {
            let package_json = format!(
                "{{\n  \"name\": {},\n  \"version\": \"1.0.0\"\n}}\n",
                quote(&project.package_name)
            );
            self.write(
                &format!("{}/package.json", project.project_folder),
                &package_json,
            );
        }
        self
    }

    /// The `rush.json` text [`build`](Self::build) writes.
    pub fn render_rush_json(&self) -> String {
        let mut out = String::from("// Generated by TestWorkspace\n{\n");
        out.push_str(
            "  \"$schema\": \"https://developer.microsoft.com/json-schemas/rush/v5/rush.schema.json\",\n",
        );
        if let Some(version) = &self.rush_version {
            out.push_str(&format!("  \"rushVersion\": {},\n", quote(version)));
        }
        if !self.review_categories.is_empty() {
            let categories = self
                .review_categories
                .iter()
                .map(|c| quote(c))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "  \"approvedPackagesPolicy\": {{\n    \"reviewCategories\": [{categories}]\n  }},\n"
            ));
        }

        if self.projects.is_empty() {
            out.push_str("  \"projects\": []\n}\n");
            return out;
        }
        out.push_str("  \"projects\": [\n");
        let entries = self
            .projects
            .iter()
            .map(|p| {
                let mut entry = format!("    {{\n      \"packageName\": {}", quote(&p.package_name));
                if !p.project_folder.is_empty() {
                    entry.push_str(&format!(
                        ",\n      \"projectFolder\": {}",
                        quote(&p.project_folder)
                    ));
                }
                if let Some(category) = &p.review_category {
                    entry.push_str(&format!(",\n      \"reviewCategory\": {}", quote(category)));
                }
                entry.push_str("\n    }");
                entry
            })
            .collect::<Vec<_>>()
            .join(",\n");
        out.push_str(&entries);
        out.push_str("\n  ]\n}\n");
        out
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the workspace.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
    }

    /// Read `rel` as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read file {}: {e}", path.display()))
    }

    /// Assert that `rel` (relative to the workspace root) exists.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {rel} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
