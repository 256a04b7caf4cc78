//! [`RushApi`]: every helper bound to one starting path

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::config::{
    ConfigCache, ConfigHandle, ProjectRecord, RushConfiguration, RushJsonDocument, RushProject,
    resolve_config_path,
};
use crate::exec::{self, ExecOptions, ExecOutput};
use crate::mutate::{self, PlannedEdit, SortOrder};

/// Accessor, mutator and command helpers for the workspace that contains
/// a starting path.
///
/// The loaded configuration is cached on first use. Edits made through this
/// value do not refresh it; call [`reload`](Self::reload) to re-read
/// `rush.json`.
///
/// # Example
///
/// ```ignore
/// use rush_core::{RushApi, SortOrder};
///
/// let mut api = RushApi::new("apps/web");
/// println!("{}", api.project_dir("web")?.display());
/// api.sort_projects(SortOrder::Alphabetically)?;
/// ```
#[derive(Debug)]
pub struct RushApi {
    start: PathBuf,
    handle: ConfigHandle,
    cache: ConfigCache,
}

impl RushApi {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        let start = start.into();
        Self {
            handle: ConfigHandle::Path(start.clone()),
            start,
            cache: ConfigCache::new(),
        }
    }

    /// The path the workspace is searched from.
    pub fn start(&self) -> &Path {
        &self.start
    }

    pub fn find_config_path(&self) -> Result<PathBuf> {
        resolve_config_path(&self.start)
    }

    /// The cached configuration, loading it on first use.
    pub fn config(&mut self) -> Result<Arc<RushConfiguration>> {
        self.cache.load(&self.handle, false)
    }

    /// Re-read `rush.json` and replace the cached configuration.
    pub fn reload(&mut self) -> Result<Arc<RushConfiguration>> {
        self.cache.load(&self.handle, true)
    }

    pub fn config_json_path(&mut self) -> Result<PathBuf> {
        Ok(self.config()?.rush_json_file().to_path_buf())
    }

    pub fn review_categories(&mut self) -> Result<Vec<String>> {
        self.config()?.review_categories()
    }

    pub fn project(&mut self, name_or_shorthand: &str) -> Result<RushProject> {
        Ok(self.config()?.project(name_or_shorthand)?.clone())
    }

    pub fn project_dir(&mut self, name_or_shorthand: &str) -> Result<PathBuf> {
        Ok(self.config()?.project_dir(name_or_shorthand)?.to_path_buf())
    }

    pub fn project_relative_dir(&mut self, name_or_shorthand: &str) -> Result<String> {
        Ok(self
            .config()?
            .project_relative_dir(name_or_shorthand)?
            .to_string())
    }

    pub fn projects(&mut self) -> Result<Vec<RushProject>> {
        Ok(self.config()?.projects().to_vec())
    }

    pub fn package_names(&mut self) -> Result<Vec<String>> {
        Ok(self.config()?.package_names())
    }

    pub fn package_scopes(&mut self) -> Result<Vec<String>> {
        Ok(self.config()?.package_scopes())
    }

    pub fn project_exists(&mut self, package_name: &str) -> Result<bool> {
        Ok(self.config()?.project_exists(package_name))
    }

    /// Edit `rush.json` through any serde view of it.
    pub fn modify<T, F>(&mut self, edit: F) -> Result<bool>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut T) -> Result<()>,
    {
        mutate::modify(&mut self.cache, &self.handle, edit)
    }

    pub fn modify_config_file<F>(&mut self, edit: F) -> Result<bool>
    where
        F: FnOnce(&mut RushJsonDocument) -> Result<()>,
    {
        mutate::modify_config_file(&mut self.cache, &self.handle, edit)
    }

    pub fn add_project(
        &mut self,
        record: ProjectRecord,
        overwrite: bool,
        position: Option<usize>,
    ) -> Result<bool> {
        mutate::add_project(&mut self.cache, &self.handle, record, overwrite, position)
    }

    pub fn plan_add_project(
        &mut self,
        record: ProjectRecord,
        overwrite: bool,
        position: Option<usize>,
    ) -> Result<PlannedEdit> {
        mutate::plan_add_project(&mut self.cache, &self.handle, record, overwrite, position)
    }

    pub fn sort_projects(&mut self, order: SortOrder) -> Result<bool> {
        mutate::sort_projects(&mut self.cache, &self.handle, order)
    }

    pub fn plan_sort_projects(&mut self, order: SortOrder) -> Result<PlannedEdit> {
        mutate::plan_sort_projects(&mut self.cache, &self.handle, order)
    }

    pub fn exec_sync_in_dir<S: AsRef<OsStr>>(
        &self,
        program: &str,
        args: &[S],
        dir: &Path,
        options: &ExecOptions,
    ) -> Result<ExecOutput> {
        exec::exec_sync_in_dir(program, args, dir, options)
    }

    pub async fn exec_async_in_dir<S: AsRef<OsStr>>(
        &self,
        program: &str,
        args: &[S],
        dir: &Path,
        options: &ExecOptions,
    ) -> Result<ExecOutput> {
        exec::exec_async_in_dir(program, args, dir, options).await
    }

    pub fn exec_sync_in_config_dir<S: AsRef<OsStr>>(
        &mut self,
        program: &str,
        args: &[S],
        options: &ExecOptions,
    ) -> Result<ExecOutput> {
        exec::exec_sync_in_config_dir(&mut self.cache, &self.handle, program, args, options)
    }

    pub async fn exec_async_in_config_dir<S: AsRef<OsStr>>(
        &mut self,
        program: &str,
        args: &[S],
        options: &ExecOptions,
    ) -> Result<ExecOutput> {
        exec::exec_async_in_config_dir(&mut self.cache, &self.handle, program, args, options).await
    }

    pub fn exec_sync_in_project_dir<S: AsRef<OsStr>>(
        &mut self,
        project: &str,
        program: &str,
        args: &[S],
        options: &ExecOptions,
    ) -> Result<ExecOutput> {
        exec::exec_sync_in_project_dir(
            &mut self.cache,
            &self.handle,
            project,
            program,
            args,
            options,
        )
    }

    pub async fn exec_async_in_project_dir<S: AsRef<OsStr>>(
        &mut self,
        project: &str,
        program: &str,
        args: &[S],
        options: &ExecOptions,
    ) -> Result<ExecOutput> {
        exec::exec_async_in_project_dir(
            &mut self.cache,
            &self.handle,
            project,
            program,
            args,
            options,
        )
        .await
    }
}
