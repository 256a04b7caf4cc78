//! Linter configuration presets for rush-api.
//!
//! A [`LintProfile`] renders to a typed [`EslintConfig`] and can be
//! written into, or checked against, a project folder.

pub mod error;
pub mod eslint;
pub mod profile;
pub mod provider;

pub use error::{Error, Result};
pub use eslint::{EslintConfig, EslintOverride};
pub use profile::LintProfile;
pub use provider::{CheckReport, PresetStatus, check_profile, write_profile};
