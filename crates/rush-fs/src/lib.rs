//! Filesystem helpers for rush-api
//!
//! Provides normalized path handling, ancestor search for workspace
//! markers and atomic text I/O.

pub mod constants;
pub mod discovery;
pub mod error;
pub mod io;
pub mod path;

pub use constants::RushPath;
pub use discovery::find_up;
pub use error::{Error, Result};
pub use path::NormalizedPath;
