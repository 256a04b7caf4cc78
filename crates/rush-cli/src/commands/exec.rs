//! Run a child command in the workspace root or a project folder

use rush_core::{ExecOptions, RushApi};

use crate::error::{CliError, Result};

/// Run `command` with inherited stdio and return its exit code.
///
/// A child killed by a signal reports exit code 1.
pub fn run_exec(api: &mut RushApi, project: Option<&str>, command: &[String]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| CliError::user("no command given"))?;
    let options = ExecOptions::new().inherit().reject(false);

    let output = match project {
        Some(project) => api.exec_sync_in_project_dir(project, program, args, &options)?,
        None => api.exec_sync_in_config_dir(program, args, &options)?,
    };
    if !output.success() {
        tracing::debug!(command = %output.command, code = ?output.code, "command exited unsuccessfully");
    }
    Ok(output.code.unwrap_or(1))
}
