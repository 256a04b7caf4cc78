//! Locating `rush.json` and caching loaded configurations

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rush_fs::RushPath;

use super::model::RushConfiguration;
use crate::{Error, Result};

/// Search `start` and its ancestors for `rush.json`.
pub fn resolve_config_path(start: &Path) -> Result<PathBuf> {
    if start.as_os_str().is_empty() {
        return Err(Error::EmptyStartPath);
    }
    match rush_fs::find_up(start, RushPath::RushJson) {
        Ok(Some(path)) => Ok(path),
        Ok(None) => Err(Error::ConfigNotFound {
            start: start.to_path_buf(),
        }),
        Err(e) if e.is_not_found() => Err(Error::ConfigNotFound {
            start: start.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Either an already loaded configuration or a path to start searching from.
#[derive(Debug, Clone)]
pub enum ConfigHandle {
    Loaded(Arc<RushConfiguration>),
    Path(PathBuf),
}

impl From<Arc<RushConfiguration>> for ConfigHandle {
    fn from(config: Arc<RushConfiguration>) -> Self {
        Self::Loaded(config)
    }
}

impl From<RushConfiguration> for ConfigHandle {
    fn from(config: RushConfiguration) -> Self {
        Self::Loaded(Arc::new(config))
    }
}

impl From<&Path> for ConfigHandle {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ConfigHandle {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&PathBuf> for ConfigHandle {
    fn from(path: &PathBuf) -> Self {
        Self::Path(path.clone())
    }
}

impl From<&str> for ConfigHandle {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for ConfigHandle {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

/// Loaded configurations keyed by the literal path the caller used.
///
/// Entries are never refreshed on their own: edits made to `rush.json`
/// after loading are only seen after `force`, [`invalidate`](Self::invalidate)
/// or [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: HashMap<String, Arc<RushConfiguration>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration for `handle`, loading it when needed.
    pub fn load(&mut self, handle: &ConfigHandle, force: bool) -> Result<Arc<RushConfiguration>> {
        let start = match handle {
            ConfigHandle::Loaded(config) => return Ok(Arc::clone(config)),
            ConfigHandle::Path(start) => start,
        };

        let key = start.to_string_lossy().into_owned();
        if !force && let Some(config) = self.entries.get(&key) {
            tracing::debug!(key = %key, "configuration cache hit");
            return Ok(Arc::clone(config));
        }

        let path = resolve_config_path(start)?;
        let config = Arc::new(RushConfiguration::load_from_file(&path)?);
        self.entries.insert(key, Arc::clone(&config));
        Ok(config)
    }

    /// Drop the entry for `start`. Returns whether one existed.
    pub fn invalidate(&mut self, start: &Path) -> bool {
        self.entries.remove(start.to_string_lossy().as_ref()).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
