//! Shared test utilities for the rush-api workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: canned `rush.json` texts
//! - [`workspace`]: [`TestWorkspace`] builder for temporary Rush monorepos

pub mod fixtures;
pub mod workspace;

pub use workspace::{TestProject, TestWorkspace};
