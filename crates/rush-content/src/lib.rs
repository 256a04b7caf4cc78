//! Format-preserving JSON-with-comments editing for rush-api
//!
//! `rush.json` is hand-maintained and full of comments, so edits go through
//! a concrete syntax tree that remembers every byte of the original text.
//! Only the parts of the document whose value actually changed are
//! re-rendered, using the indentation and quoting style detected in the
//! source.

pub mod diff;
pub mod error;
pub mod jsonc;

pub use diff::{LineChanges, unified_diff};
pub use error::{Error, Result};
pub use jsonc::{JsoncDocument, JsoncStyle, LineEnding, Quote};
