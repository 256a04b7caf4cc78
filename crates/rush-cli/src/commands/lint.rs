//! Write or check a lint profile

use colored::Colorize;
use rush_core::RushApi;
use rush_presets::{LintProfile, PresetStatus, check_profile, write_profile};

use crate::error::{CliError, Result};

pub fn run_lint_profile(
    api: &mut RushApi,
    profile: LintProfile,
    project: Option<&str>,
    force: bool,
    check: bool,
) -> Result<()> {
    let dir = match project {
        Some(project) => api.project_dir(project)?,
        None => api.config()?.root_dir().to_path_buf(),
    };

    if check {
        let report = check_profile(profile, &dir)?;
        let status = match report.status {
            PresetStatus::Healthy => "in sync".green(),
            PresetStatus::Missing => "missing".yellow(),
            PresetStatus::Drifted => "drifted".yellow(),
            PresetStatus::Broken => "broken".red(),
        };
        println!("{}: {}", report.path.display(), status);
        for detail in &report.details {
            println!("  {}", detail.dimmed());
        }
        if !report.is_healthy() {
            return Err(CliError::user(format!(
                "{} does not match the {profile} profile",
                report.path.display()
            )));
        }
        return Ok(());
    }

    let path = write_profile(profile, &dir, force)?;
    println!("{} wrote {} ({profile})", "ok:".green().bold(), path.display());
    Ok(())
}
