//! Running commands in the workspace root or a project folder
//!
//! The working directory is always pinned by the caller-facing helper;
//! everything else about the child process comes from [`ExecOptions`].

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tokio::io::AsyncWriteExt;

use crate::config::{ConfigCache, ConfigHandle};
use crate::{Error, Result};

/// What to connect a standard stream to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stdio {
    /// Capture output, or feed [`ExecOptions::input`] on stdin
    #[default]
    Pipe,
    Inherit,
    Null,
}

impl From<Stdio> for std::process::Stdio {
    fn from(stdio: Stdio) -> Self {
        match stdio {
            Stdio::Pipe => Self::piped(),
            Stdio::Inherit => Self::inherit(),
            Stdio::Null => Self::null(),
        }
    }
}

/// Options passed through to the child process.
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub env: BTreeMap<String, String>,
    pub env_remove: Vec<String>,
    /// Start from an empty environment
    pub env_clear: bool,
    /// Text written to stdin when stdin is piped
    pub input: Option<String>,
    pub stdin: Stdio,
    pub stdout: Stdio,
    pub stderr: Stdio,
    /// Turn a non-zero exit into [`Error::CommandFailed`]
    pub reject: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            env: BTreeMap::new(),
            env_remove: Vec::new(),
            env_clear: false,
            input: None,
            stdin: Stdio::Pipe,
            stdout: Stdio::Pipe,
            stderr: Stdio::Pipe,
            reject: true,
        }
    }
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    pub fn env_clear(mut self) -> Self {
        self.env_clear = true;
        self
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn stdin(mut self, stdio: Stdio) -> Self {
        self.stdin = stdio;
        self
    }

    pub fn stdout(mut self, stdio: Stdio) -> Self {
        self.stdout = stdio;
        self
    }

    pub fn stderr(mut self, stdio: Stdio) -> Self {
        self.stderr = stdio;
        self
    }

    /// Connect all three streams to the parent's.
    pub fn inherit(self) -> Self {
        self.stdin(Stdio::Inherit)
            .stdout(Stdio::Inherit)
            .stderr(Stdio::Inherit)
    }

    pub fn reject(mut self, reject: bool) -> Self {
        self.reject = reject;
        self
    }
}

/// Result of a finished child process.
///
/// Streams that were not piped come back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub command: String,
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `program` in `dir` and wait for it.
pub fn exec_sync_in_dir<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    dir: &Path,
    options: &ExecOptions,
) -> Result<ExecOutput> {
    let command = describe(program, args);
    tracing::debug!(command = %command, dir = %dir.display(), "running command");

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);
    if options.env_clear {
        cmd.env_clear();
    }
    for key in &options.env_remove {
        cmd.env_remove(key);
    }
    cmd.envs(&options.env)
        .stdin(options.stdin)
        .stdout(options.stdout)
        .stderr(options.stderr);

    let mut child = cmd.spawn().map_err(|source| Error::Spawn {
        command: command.clone(),
        source,
    })?;

    let writer = match (child.stdin.take(), options.input.clone()) {
        (Some(mut stdin), Some(input)) => {
            Some(std::thread::spawn(move || stdin.write_all(input.as_bytes())))
        }
        _ => None,
    };

    let output = child.wait_with_output().map_err(|source| Error::Spawn {
        command: command.clone(),
        source,
    })?;
    if let Some(writer) = writer
        && let Ok(Err(e)) = writer.join()
    {
        tracing::debug!(command = %command, error = %e, "child closed stdin early");
    }

    finish(command, output.status, &output.stdout, &output.stderr, options.reject)
}

/// Run `program` in `dir` on the tokio runtime and wait for it.
pub async fn exec_async_in_dir<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    dir: &Path,
    options: &ExecOptions,
) -> Result<ExecOutput> {
    let command = describe(program, args);
    tracing::debug!(command = %command, dir = %dir.display(), "running command");

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args).current_dir(dir);
    if options.env_clear {
        cmd.env_clear();
    }
    for key in &options.env_remove {
        cmd.env_remove(key);
    }
    cmd.envs(&options.env)
        .stdin(options.stdin)
        .stdout(options.stdout)
        .stderr(options.stderr);

    let mut child = cmd.spawn().map_err(|source| Error::Spawn {
        command: command.clone(),
        source,
    })?;

    let writer = match (child.stdin.take(), options.input.clone()) {
        (Some(mut stdin), Some(input)) => Some(tokio::spawn(async move {
            stdin.write_all(input.as_bytes()).await
        })),
        _ => None,
    };

    let output = child.wait_with_output().await.map_err(|source| Error::Spawn {
        command: command.clone(),
        source,
    })?;
    if let Some(writer) = writer
        && let Ok(Err(e)) = writer.await
    {
        tracing::debug!(command = %command, error = %e, "child closed stdin early");
    }

    finish(command, output.status, &output.stdout, &output.stderr, options.reject)
}

/// Run `program` in the directory holding `rush.json`.
pub fn exec_sync_in_config_dir<S: AsRef<OsStr>>(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    program: &str,
    args: &[S],
    options: &ExecOptions,
) -> Result<ExecOutput> {
    let config = cache.load(handle, false)?;
    exec_sync_in_dir(program, args, config.root_dir(), options)
}

pub async fn exec_async_in_config_dir<S: AsRef<OsStr>>(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    program: &str,
    args: &[S],
    options: &ExecOptions,
) -> Result<ExecOutput> {
    let config = cache.load(handle, false)?;
    exec_async_in_dir(program, args, config.root_dir(), options).await
}

/// Run `program` in the folder of `project` (full name or shorthand).
pub fn exec_sync_in_project_dir<S: AsRef<OsStr>>(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    project: &str,
    program: &str,
    args: &[S],
    options: &ExecOptions,
) -> Result<ExecOutput> {
    let config = cache.load(handle, false)?;
    exec_sync_in_dir(program, args, config.project_dir(project)?, options)
}

pub async fn exec_async_in_project_dir<S: AsRef<OsStr>>(
    cache: &mut ConfigCache,
    handle: &ConfigHandle,
    project: &str,
    program: &str,
    args: &[S],
    options: &ExecOptions,
) -> Result<ExecOutput> {
    let config = cache.load(handle, false)?;
    exec_async_in_dir(program, args, config.project_dir(project)?, options).await
}

fn describe<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut command = program.to_string();
    for arg in args {
        command.push(' ');
        command.push_str(&arg.as_ref().to_string_lossy());
    }
    command
}

fn finish(
    command: String,
    status: ExitStatus,
    stdout: &[u8],
    stderr: &[u8],
    reject: bool,
) -> Result<ExecOutput> {
    let output = ExecOutput {
        command,
        code: status.code(),
        stdout: String::from_utf8_lossy(stdout).into_owned(),
        stderr: String::from_utf8_lossy(stderr).into_owned(),
    };
    if reject && !status.success() {
        return Err(Error::CommandFailed {
            command: output.command,
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }
    tracing::debug!(command = %output.command, code = ?output.code, "command finished");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_command_line() {
        assert_eq!(describe("rush", &["build", "-t", "web"]), "rush build -t web");
        assert_eq!(describe::<&str>("ls", &[]), "ls");
    }

    #[test]
    fn defaults_reject_and_pipe() {
        let options = ExecOptions::default();
        assert!(options.reject);
        assert_eq!(options.stdout, Stdio::Pipe);
        assert!(options.input.is_none());
    }
}
