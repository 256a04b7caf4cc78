//! Writing and checking a profile inside a project folder

use std::path::{Path, PathBuf};

use rush_fs::{NormalizedPath, RushPath, io};

use crate::eslint::EslintConfig;
use crate::profile::LintProfile;
use crate::{Error, Result};

/// State of a project's `.eslintrc.json` relative to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetStatus {
    Healthy,
    Missing,
    Drifted,
    Broken,
}

/// Report from checking a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub status: PresetStatus,
    pub path: PathBuf,
    pub details: Vec<String>,
}

impl CheckReport {
    fn new(status: PresetStatus, path: &NormalizedPath, detail: Option<String>) -> Self {
        Self {
            status,
            path: path.to_native(),
            details: detail.into_iter().collect(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == PresetStatus::Healthy
    }
}

fn target(dir: &Path) -> Result<NormalizedPath> {
    let dir = NormalizedPath::new(dir);
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_native(),
        });
    }
    Ok(dir.join(RushPath::EslintRc.as_str()))
}

/// Write `profile` to `<dir>/.eslintrc.json`.
///
/// An existing file is left alone unless `force` is set.
pub fn write_profile(profile: LintProfile, dir: &Path, force: bool) -> Result<PathBuf> {
    let path = target(dir)?;
    if path.exists() && !force {
        return Err(Error::AlreadyExists {
            path: path.to_native(),
        });
    }

    io::write_text(&path, &profile.to_json()?)?;
    tracing::info!(profile = %profile, path = %path, "wrote lint profile");
    Ok(path.to_native())
}

/// Compare `<dir>/.eslintrc.json` against `profile`.
///
/// Formatting is ignored; only the parsed configuration is compared.
pub fn check_profile(profile: LintProfile, dir: &Path) -> Result<CheckReport> {
    let path = target(dir)?;
    if !path.exists() {
        return Ok(CheckReport::new(
            PresetStatus::Missing,
            &path,
            Some(format!("{} not found", RushPath::EslintRc)),
        ));
    }

    let text = io::read_text(&path)?;
    let report = match serde_json::from_str::<EslintConfig>(&text) {
        Err(e) => CheckReport::new(PresetStatus::Broken, &path, Some(e.to_string())),
        Ok(config) if config == profile.config() => {
            CheckReport::new(PresetStatus::Healthy, &path, None)
        }
        Ok(_) => CheckReport::new(
            PresetStatus::Drifted,
            &path,
            Some(format!("differs from the {profile} profile")),
        ),
    };
    tracing::debug!(profile = %profile, path = %path, status = ?report.status, "checked lint profile");
    Ok(report)
}
