//! Tests for running commands in the workspace and project folders
#![cfg(unix)]

use std::path::Path;

use rush_core::config::{ConfigCache, ConfigHandle};
use rush_core::exec::{self, ExecOptions, Stdio};
use rush_core::Error;
use rush_test_utils::TestWorkspace;

fn canonical(path: &Path) -> String {
    dunce::canonicalize(path).unwrap().display().to_string()
}

mod sync_tests {
    use super::*;

    #[test]
    fn test_runs_in_given_dir() {
        let ws = TestWorkspace::standard();
        let output =
            exec::exec_sync_in_dir("pwd", &[] as &[&str], &ws.path("apps"), &ExecOptions::new())
                .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), canonical(&ws.path("apps")));
        assert_eq!(output.command, "pwd");
    }

    #[test]
    fn test_runs_in_config_dir() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.path("apps/web"));

        let output = exec::exec_sync_in_config_dir(
            &mut cache,
            &handle,
            "pwd",
            &[] as &[&str],
            &ExecOptions::new(),
        )
        .unwrap();
        assert_eq!(output.stdout.trim(), canonical(ws.root()));
    }

    #[test]
    fn test_runs_in_project_dir_by_shorthand() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.root());

        let output = exec::exec_sync_in_project_dir(
            &mut cache,
            &handle,
            "lint",
            "pwd",
            &[] as &[&str],
            &ExecOptions::new(),
        )
        .unwrap();
        assert_eq!(output.stdout.trim(), canonical(&ws.path("tools/lint")));
    }

    #[test]
    fn test_unknown_project_fails_before_spawning() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.root());

        let err = exec::exec_sync_in_project_dir(
            &mut cache,
            &handle,
            "mobile",
            "pwd",
            &[] as &[&str],
            &ExecOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { .. }));
    }

    #[test]
    fn test_non_zero_exit_is_rejected_by_default() {
        let ws = TestWorkspace::new();
        let err = exec::exec_sync_in_dir(
            "sh",
            &["-c", "echo out; echo err >&2; exit 3"],
            ws.root(),
            &ExecOptions::new(),
        )
        .unwrap_err();

        match err {
            Error::CommandFailed {
                code,
                stdout,
                stderr,
                ..
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(stdout, "out\n");
                assert_eq!(stderr, "err\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_zero_exit_without_reject() {
        let ws = TestWorkspace::new();
        let output = exec::exec_sync_in_dir(
            "sh",
            &["-c", "exit 7"],
            ws.root(),
            &ExecOptions::new().reject(false),
        )
        .unwrap();
        assert_eq!(output.code, Some(7));
        assert!(!output.success());
    }

    #[test]
    fn test_spawn_failure_keeps_io_error() {
        let ws = TestWorkspace::new();
        let err = exec::exec_sync_in_dir(
            "definitely-not-a-real-program-rush-api",
            &[] as &[&str],
            ws.root(),
            &ExecOptions::new(),
        )
        .unwrap_err();

        match err {
            Error::Spawn { source, command } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
                assert_eq!(command, "definitely-not-a-real-program-rush-api");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_env_and_input_pass_through() {
        let ws = TestWorkspace::new();
        let options = ExecOptions::new()
            .env("RUSH_API_TEST_VALUE", "42")
            .input("hello from stdin");
        let output = exec::exec_sync_in_dir(
            "sh",
            &["-c", "printf '%s ' \"$RUSH_API_TEST_VALUE\"; cat"],
            ws.root(),
            &options,
        )
        .unwrap();
        assert_eq!(output.stdout, "42 hello from stdin");
    }

    #[test]
    fn test_env_remove() {
        let ws = TestWorkspace::new();
        let options = ExecOptions::new()
            .env("RUSH_API_TEST_VALUE", "42")
            .env_remove("HOME");
        let output = exec::exec_sync_in_dir(
            "sh",
            &["-c", "printf '%s' \"${HOME:-unset}\""],
            ws.root(),
            &options,
        )
        .unwrap();
        assert_eq!(output.stdout, "unset");
    }

    #[test]
    fn test_null_stdout_is_empty() {
        let ws = TestWorkspace::new();
        let output = exec::exec_sync_in_dir(
            "sh",
            &["-c", "echo hidden"],
            ws.root(),
            &ExecOptions::new().stdout(Stdio::Null),
        )
        .unwrap();
        assert_eq!(output.stdout, "");
    }
}

mod async_tests {
    use super::*;

    #[tokio::test]
    async fn test_async_runs_in_project_dir() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.root());

        let output = exec::exec_async_in_project_dir(
            &mut cache,
            &handle,
            "@acme/web",
            "pwd",
            &[] as &[&str],
            &ExecOptions::new(),
        )
        .await
        .unwrap();
        assert_eq!(output.stdout.trim(), canonical(&ws.path("apps/web")));
    }

    #[tokio::test]
    async fn test_async_config_dir_and_input() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.path("tools"));

        let output = exec::exec_async_in_config_dir(
            &mut cache,
            &handle,
            "sh",
            &["-c", "cat; pwd"],
            &ExecOptions::new().input("ping\n"),
        )
        .await
        .unwrap();
        assert_eq!(output.stdout, format!("ping\n{}\n", canonical(ws.root())));
    }

    #[tokio::test]
    async fn test_async_rejects_failure() {
        let ws = TestWorkspace::new();
        let err = exec::exec_async_in_dir("sh", &["-c", "exit 2"], ws.root(), &ExecOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
    }
}
