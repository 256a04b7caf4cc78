//! The Rush workspace configuration: locating, loading, caching and reading
//!
//! `rush.json` is found by walking up from a starting directory. Loaded
//! configurations are validated into a [`RushConfiguration`] and cached in a
//! [`ConfigCache`] keyed by the starting path the caller used.
//!
//! # Example
//!
//! ```ignore
//! use rush_core::config::{ConfigCache, ConfigHandle};
//!
//! let mut cache = ConfigCache::new();
//! let config = cache.load(&ConfigHandle::from("apps/web"), false)?;
//! for scope in config.package_scopes() {
//!     println!("{scope}");
//! }
//! ```

mod cache;
mod model;
mod record;

pub use cache::{ConfigCache, ConfigHandle, resolve_config_path};
pub use model::{ApprovedPackagesPolicy, RushConfiguration, RushProject, package_scope};
pub use record::{ProjectRecord, RushJsonDocument, is_truthy};
