//! Editing `rush.json` without disturbing its comments or layout
//!
//! Every edit reads the file fresh, parses it permissively, hands a typed
//! view to the caller's edit function and renders the result back over the
//! original text. The file is only written when the rendered text differs.
//!
//! Each operation has a `plan_*` form that stops short of writing and
//! returns a [`PlannedEdit`] for dry runs.

mod sort;

pub use sort::{ReviewCategoryOrder, SortOrder, compare_alphabetically, sort_records};

use std::path::{Path, PathBuf};

use rush_content::{JsoncDocument, LineChanges};
use rush_fs::NormalizedPath;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ConfigCache, ConfigHandle, ProjectRecord, RushJsonDocument};
use crate::{Error, Result};

/// The before and after text of one file edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
}

impl PlannedEdit {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }

    /// Write the updated text if it differs. Returns whether a write happened.
    pub fn apply(&self) -> Result<bool> {
        if !self.is_changed() {
            tracing::debug!(path = %self.path.display(), "no changes to write");
            return Ok(false);
        }
        rush_fs::io::write_text(&NormalizedPath::new(&self.path), &self.updated)?;
        let changes = self.line_changes();
        tracing::info!(
            path = %self.path.display(),
            inserted = changes.inserted,
            deleted = changes.deleted,
            "updated file"
        );
        Ok(true)
    }

    pub fn line_changes(&self) -> LineChanges {
        LineChanges::between(&self.original, &self.updated)
    }

    /// Unified diff labelled with the file name.
    pub fn unified_diff(&self) -> String {
        let label = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        rush_content::unified_diff(&self.original, &self.updated, &label)
    }
}

/// Compute the edit `edit` makes to the JSON file at `path`.
///
/// The file content must deserialize as `T`; use [`serde_json::Value`] for
/// an untyped edit. Errors from `edit` are returned as-is.
pub fn plan_json_file_edit<T, F>(path: &Path, edit: F) -> Result<PlannedEdit>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce(&mut T) -> Result<()>,
{
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let original = rush_fs::io::read_text(&NormalizedPath::new(path))?;
    let document = JsoncDocument::parse(&original)?;

    let mut typed: T =
        serde_json::from_value(document.value().clone()).map_err(|e| Error::Schema {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let before = serde_json::to_value(&typed)?;
    edit(&mut typed)?;
    let after = serde_json::to_value(&typed)?;
    // an edit that leaves the typed view alone never touches the text
    let updated = if after == before {
        original.clone()
    } else {
        document.update(&after)
    };

    Ok(PlannedEdit {
        path: path.to_path_buf(),
        original,
        updated,
    })
}

/// Apply `edit` to the JSON file at `path`. Returns whether the file changed.
pub fn modify_json_file<T, F>(path: &Path, edit: F) -> Result<bool>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce(&mut T) -> Result<()>,
{
    plan_json_file_edit(path, edit)?.apply()
}

/// Path of the `rush.json` behind `handle`.
pub fn config_json_path(cache: &mut ConfigCache, handle: &ConfigHandle) -> Result<PathBuf> {
    Ok(cache.load(handle, false)?.rush_json_file().to_path_buf())
}

/// Apply `edit` to the `rush.json` behind `handle`.
pub fn modify<T, F>(cache: &mut ConfigCache, handle: &ConfigHandle, edit: F) -> Result<bool>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce(&mut T) -> Result<()>,
{
    let path = config_json_path(cache, handle)?;
    modify_json_file(&path, edit)
}

pub fn plan_modify_config_file<F>(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    edit: F,
) -> Result<PlannedEdit>
where
    F: FnOnce(&mut RushJsonDocument) -> Result<()>,
{
    let path = config_json_path(cache, handle)?;
    plan_json_file_edit(&path, |document: &mut RushJsonDocument| {
        if !document.has_version_marker() {
            return Err(Error::Schema {
                path: path.clone(),
                message: "the \"rushVersion\" field is missing or empty".to_string(),
            });
        }
        edit(document)
    })
}

/// Typed edit of `rush.json` that refuses files without a `rushVersion`.
pub fn modify_config_file<F>(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    edit: F,
) -> Result<bool>
where
    F: FnOnce(&mut RushJsonDocument) -> Result<()>,
{
    plan_modify_config_file(cache, handle, edit)?.apply()
}

/// What [`insert_project`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted(usize),
    Replaced(usize),
    /// A project with the same name exists and overwriting was not requested
    Skipped(usize),
}

/// Add `record` to `projects`, keeping package names unique.
///
/// `position` past the end appends.
pub fn insert_project(
    projects: &mut Vec<ProjectRecord>,
    record: ProjectRecord,
    overwrite: bool,
    position: Option<usize>,
) -> AddOutcome {
    if let Some(index) = projects
        .iter()
        .position(|p| !p.package_name.is_empty() && p.package_name == record.package_name)
    {
        if overwrite {
            projects[index] = record;
            return AddOutcome::Replaced(index);
        }
        return AddOutcome::Skipped(index);
    }

    let index = position.map_or(projects.len(), |p| p.min(projects.len()));
    projects.insert(index, record);
    AddOutcome::Inserted(index)
}

pub fn plan_add_project(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    record: ProjectRecord,
    overwrite: bool,
    position: Option<usize>,
) -> Result<PlannedEdit> {
    plan_modify_config_file(cache, handle, |document| {
        let name = record.package_name.clone();
        let outcome = insert_project(document.projects_mut(), record, overwrite, position);
        tracing::debug!(project = %name, ?outcome, "add project");
        Ok(())
    })
}

/// Add or replace a project entry in `rush.json`.
pub fn add_project(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    record: ProjectRecord,
    overwrite: bool,
    position: Option<usize>,
) -> Result<bool> {
    plan_add_project(cache, handle, record, overwrite, position)?.apply()
}

pub fn plan_sort_projects(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    order: SortOrder,
) -> Result<PlannedEdit> {
    let categories = match order {
        SortOrder::Alphabetically => Vec::new(),
        SortOrder::ReviewCategory => cache.load(handle, false)?.review_categories()?,
    };
    plan_modify_config_file(cache, handle, |document| {
        sort_records(document.projects_mut(), order, &categories);
        Ok(())
    })
}

/// Reorder the `projects` array of `rush.json`.
pub fn sort_projects(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    order: SortOrder,
) -> Result<bool> {
    plan_sort_projects(cache, handle, order)?.apply()
}
