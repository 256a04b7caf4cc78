//! Read-only model of a loaded Rush workspace

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rush_fs::NormalizedPath;
use semver::Version;
use serde::{Deserialize, Serialize};

use super::record::ProjectRecord;
use crate::{Error, Result};

const DEFAULT_PROJECT_FOLDER_MIN_DEPTH: usize = 1;
const DEFAULT_PROJECT_FOLDER_MAX_DEPTH: usize = 2;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRushJson {
    rush_version: Option<String>,
    #[serde(default)]
    projects: Vec<ProjectRecord>,
    approved_packages_policy: Option<ApprovedPackagesPolicy>,
    project_folder_min_depth: Option<usize>,
    project_folder_max_depth: Option<usize>,
}

/// The `approvedPackagesPolicy` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedPackagesPolicy {
    #[serde(default)]
    pub review_categories: Option<Vec<String>>,
    #[serde(default)]
    pub ignored_npm_scopes: Vec<String>,
}

/// A project as seen through a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RushProject {
    pub package_name: String,
    /// `projectFolder` as written in `rush.json`
    pub project_relative_folder: Option<String>,
    /// `projectFolder` resolved against the workspace root
    pub project_folder: Option<PathBuf>,
    pub review_category: Option<String>,
    pub cyclic_dependency_projects: Vec<String>,
    pub version_policy_name: Option<String>,
    pub should_publish: bool,
    pub skip_rush_check: bool,
    pub publish_folder: Option<String>,
}

impl RushProject {
    /// The package name without its `@scope/` prefix.
    pub fn unscoped_name(&self) -> &str {
        unscoped_name(&self.package_name)
    }
}

/// A validated `rush.json`.
#[derive(Debug, Clone)]
pub struct RushConfiguration {
    rush_json_file: PathBuf,
    root_dir: PathBuf,
    rush_version: Version,
    projects: Vec<RushProject>,
    approved_packages_policy: Option<ApprovedPackagesPolicy>,
    project_folder_min_depth: usize,
    project_folder_max_depth: usize,
}

impl RushConfiguration {
    /// Read, parse and validate the `rush.json` at `path`.
    ///
    /// Every failure is reported as [`Error::Load`] naming the file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let absolute = dunce::canonicalize(path)
            .map_err(|e| Error::load(path, rush_fs::Error::io(path, e).into()))?;
        let text = rush_fs::io::read_text(&NormalizedPath::new(&absolute))
            .map_err(|e| Error::load(&absolute, e.into()))?;
        let config =
            Self::from_source(&text, &absolute).map_err(|e| Error::load(&absolute, e))?;
        tracing::debug!(
            path = %absolute.display(),
            projects = config.projects.len(),
            "loaded rush configuration"
        );
        Ok(config)
    }

    /// Build a configuration from `rush.json` text located at `rush_json_file`.
    pub fn from_source(source: &str, rush_json_file: &Path) -> Result<Self> {
        let value = rush_content::jsonc::parse(source)?;
        let raw: RawRushJson = serde_json::from_value(value)?;

        let rush_version = raw
            .rush_version
            .ok_or_else(|| Error::Invalid("the \"rushVersion\" field is required".to_string()))?;
        let rush_version = Version::parse(rush_version.trim()).map_err(|e| {
            Error::Invalid(format!("\"rushVersion\" is not a valid version: {e}"))
        })?;

        let min_depth = raw
            .project_folder_min_depth
            .unwrap_or(DEFAULT_PROJECT_FOLDER_MIN_DEPTH);
        let max_depth = raw
            .project_folder_max_depth
            .unwrap_or(DEFAULT_PROJECT_FOLDER_MAX_DEPTH);
        if min_depth < 1 {
            return Err(Error::Invalid(
                "\"projectFolderMinDepth\" must be at least 1".to_string(),
            ));
        }
        if max_depth < min_depth {
            return Err(Error::Invalid(
                "\"projectFolderMaxDepth\" must not be less than \"projectFolderMinDepth\""
                    .to_string(),
            ));
        }

        let root_dir = rush_json_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let categories = raw
            .approved_packages_policy
            .as_ref()
            .and_then(|policy| policy.review_categories.as_ref());

        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(raw.projects.len());
        for record in raw.projects {
            if record.package_name.is_empty() {
                return Err(Error::Invalid(
                    "a project is missing its \"packageName\"".to_string(),
                ));
            }
            if !seen.insert(record.package_name.clone()) {
                return Err(Error::Invalid(format!(
                    "the project \"{}\" is listed more than once",
                    record.package_name
                )));
            }

            let relative = record.project_folder().map(str::to_string);
            if let Some(folder) = &relative {
                check_project_folder(&record.package_name, folder, min_depth, max_depth)?;
            }

            let review_category = record.review_category().map(str::to_string);
            if let (Some(category), Some(categories)) = (&review_category, categories)
                && !categories.contains(category)
            {
                tracing::warn!(
                    project = %record.package_name,
                    category = %category,
                    "review category is not listed in approvedPackagesPolicy"
                );
            }

            projects.push(RushProject {
                project_folder: relative.as_ref().map(|folder| root_dir.join(folder)),
                project_relative_folder: relative,
                review_category,
                cyclic_dependency_projects: record.cyclic_dependency_projects().to_vec(),
                version_policy_name: record.version_policy_name().map(str::to_string),
                should_publish: record.should_publish(),
                skip_rush_check: record.skip_rush_check(),
                publish_folder: record.publish_folder().map(str::to_string),
                package_name: record.package_name,
            });
        }

        Ok(Self {
            rush_json_file: rush_json_file.to_path_buf(),
            root_dir,
            rush_version,
            projects,
            approved_packages_policy: raw.approved_packages_policy,
            project_folder_min_depth: min_depth,
            project_folder_max_depth: max_depth,
        })
    }

    /// Absolute path of the `rush.json` this configuration was loaded from.
    pub fn rush_json_file(&self) -> &Path {
        &self.rush_json_file
    }

    /// The directory holding `rush.json`.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn rush_version(&self) -> &Version {
        &self.rush_version
    }

    pub fn approved_packages_policy(&self) -> Option<&ApprovedPackagesPolicy> {
        self.approved_packages_policy.as_ref()
    }

    pub fn project_folder_min_depth(&self) -> usize {
        self.project_folder_min_depth
    }

    pub fn project_folder_max_depth(&self) -> usize {
        self.project_folder_max_depth
    }

    /// Projects in `rush.json` order.
    pub fn projects(&self) -> &[RushProject] {
        &self.projects
    }

    pub fn get_project_by_name(&self, name: &str) -> Option<&RushProject> {
        self.projects.iter().find(|p| p.package_name == name)
    }

    /// Resolve a full package name or an unscoped shorthand.
    ///
    /// An exact match wins. Otherwise `web` finds `@acme/web` as long as no
    /// other project shares that unscoped name.
    pub fn find_project_by_shorthand_name(&self, name: &str) -> Option<&RushProject> {
        if let Some(project) = self.get_project_by_name(name) {
            return Some(project);
        }

        let mut matches = self.projects.iter().filter(|p| p.unscoped_name() == name);
        let first = matches.next()?;
        if matches.next().is_some() {
            tracing::debug!(shorthand = name, "ambiguous shorthand project name");
            return None;
        }
        Some(first)
    }

    /// Exact name first, then shorthand.
    pub fn project(&self, name_or_shorthand: &str) -> Result<&RushProject> {
        self.find_project_by_shorthand_name(name_or_shorthand)
            .ok_or_else(|| Error::ProjectNotFound {
                name: name_or_shorthand.to_string(),
            })
    }

    /// Absolute folder of a project.
    pub fn project_dir(&self, name_or_shorthand: &str) -> Result<&Path> {
        let project = self.project(name_or_shorthand)?;
        project
            .project_folder
            .as_deref()
            .ok_or_else(|| missing_field(project, "projectFolder"))
    }

    /// Folder of a project relative to the workspace root.
    pub fn project_relative_dir(&self, name_or_shorthand: &str) -> Result<&str> {
        let project = self.project(name_or_shorthand)?;
        project
            .project_relative_folder
            .as_deref()
            .ok_or_else(|| missing_field(project, "projectRelativeFolder"))
    }

    pub fn package_names(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.package_name.clone()).collect()
    }

    /// Distinct `@scope` prefixes of scoped package names, in first-seen order.
    pub fn package_scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = Vec::new();
        for project in &self.projects {
            if let Some(scope) = package_scope(&project.package_name)
                && !scopes.iter().any(|s| s == scope)
            {
                scopes.push(scope.to_string());
            }
        }
        scopes
    }

    /// `approvedPackagesPolicy.reviewCategories`, in priority order.
    pub fn review_categories(&self) -> Result<Vec<String>> {
        self.approved_packages_policy
            .as_ref()
            .and_then(|policy| policy.review_categories.clone())
            .ok_or(Error::ReviewCategoriesNotFound)
    }

    /// Case-insensitive package name membership.
    pub fn project_exists(&self, package_name: &str) -> bool {
        let wanted = package_name.to_uppercase();
        self.projects
            .iter()
            .any(|p| p.package_name.to_uppercase() == wanted)
    }
}

/// The scope of a package name: `@acme/web` has scope `@acme`.
///
/// A bare `@/x` has no scope.
pub fn package_scope(package_name: &str) -> Option<&str> {
    if !package_name.starts_with('@') {
        return None;
    }
    match package_name.find('/') {
        Some(slash) if slash > 1 => Some(&package_name[..slash]),
        _ => None,
    }
}

fn unscoped_name(package_name: &str) -> &str {
    match package_name.strip_prefix('@') {
        Some(rest) => rest.split_once('/').map_or(package_name, |(_, name)| name),
        None => package_name,
    }
}

fn missing_field(project: &RushProject, field: &str) -> Error {
    Error::MissingField {
        project: project.package_name.clone(),
        field: field.to_string(),
    }
}

fn check_project_folder(package: &str, folder: &str, min: usize, max: usize) -> Result<()> {
    let normalized = NormalizedPath::new(folder);
    if normalized.is_absolute() || normalized.segments().any(|s| s == "..") {
        return Err(Error::Invalid(format!(
            "the projectFolder \"{folder}\" of \"{package}\" must be a path inside the workspace"
        )));
    }
    let depth = normalized.depth();
    if depth < min || depth > max {
        return Err(Error::Invalid(format!(
            "the projectFolder \"{folder}\" of \"{package}\" has depth {depth}, \
             expected between {min} and {max}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes() {
        assert_eq!(package_scope("@acme/web"), Some("@acme"));
        assert_eq!(package_scope("@a/web"), Some("@a"));
        assert_eq!(package_scope("@/web"), None);
        assert_eq!(package_scope("web"), None);
        assert_eq!(package_scope("@acme"), None);
    }

    #[test]
    fn unscoped_names() {
        assert_eq!(unscoped_name("@acme/web"), "web");
        assert_eq!(unscoped_name("web"), "web");
        assert_eq!(unscoped_name("@acme"), "@acme");
    }

    #[test]
    fn folder_depth_limits() {
        assert!(check_project_folder("a", "apps/a", 1, 2).is_ok());
        assert!(check_project_folder("a", "a", 1, 2).is_ok());
        assert!(check_project_folder("a", "x/y/z", 1, 2).is_err());
        assert!(check_project_folder("a", "../a", 1, 2).is_err());
        assert!(check_project_folder("a", "/abs/a", 1, 2).is_err());
    }
}
