//! Error types for rush-core

use std::path::PathBuf;

/// Result type for rush-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rush-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `rush.json` between the starting path and the filesystem root
    #[error("Rush configuration cannot be found in: {}", start.display())]
    ConfigNotFound { start: PathBuf },

    #[error("Rush config starting path must be a non-empty string")]
    EmptyStartPath,

    #[error("Rush project \"{name}\" cannot be found")]
    ProjectNotFound { name: String },

    #[error("File \"{}\" does not exist", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Rush review categories could not be found")]
    ReviewCategoriesNotFound,

    /// The configuration exists but could not be read, parsed or validated
    #[error("Rush configuration at \"{}\" cannot be loaded: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Rush project \"{project}\" property \"{field}\" has empty value")]
    MissingField { project: String, field: String },

    /// The edit target does not look like the document it was expected to be
    #[error("Malformed configuration in \"{}\": {message}", path.display())]
    Schema { path: PathBuf, message: String },

    /// Semantically invalid configuration content
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The child process could not be started
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed with {}", describe_exit(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from rush-fs
    #[error(transparent)]
    Fs(#[from] rush_fs::Error),

    /// Parse error from rush-content
    #[error(transparent)]
    Content(#[from] rush_content::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn load(path: impl Into<PathBuf>, source: Error) -> Self {
        Self::Load {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// True for the "something is missing" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ProjectNotFound { .. }
                | Self::FileNotFound { .. }
                | Self::ReviewCategoriesNotFound
        )
    }

    /// Exit code of a failed child process, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
