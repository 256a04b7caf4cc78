//! Core layer of rush-api
//!
//! Builds on the lower-layer crates to provide:
//!
//! - **Configuration accessor**: find, load, cache and query `rush.json`
//! - **Configuration mutator**: typed, comment-preserving edits of `rush.json`
//! - **Project sorting**: alphabetical and review-category orderings
//! - **Command execution**: run commands in the workspace root or a project folder
//! - **[`RushApi`]**: all of the above bound to one starting path
//!
//! # Architecture
//!
//! ```text
//!            rush-cli
//!               |
//!           rush-core
//!               |
//!       +-------+--------+
//!       |                |
//!    rush-fs       rush-content
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod exec;
pub mod mutate;

pub use api::RushApi;
pub use config::{
    ApprovedPackagesPolicy, ConfigCache, ConfigHandle, ProjectRecord, RushConfiguration,
    RushJsonDocument, RushProject, resolve_config_path,
};
pub use error::{Error, Result};
pub use exec::{ExecOptions, ExecOutput, Stdio};
pub use mutate::{AddOutcome, PlannedEdit, ReviewCategoryOrder, SortOrder};
