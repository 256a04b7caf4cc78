//! Text diffs for previewing configuration edits

use similar::{ChangeTag, TextDiff};

/// Number of inserted and deleted lines between two texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineChanges {
    pub inserted: usize,
    pub deleted: usize,
}

impl LineChanges {
    /// Count line-level changes using the `similar` line diff.
    pub fn between(old: &str, new: &str) -> Self {
        let mut changes = Self::default();
        for change in TextDiff::from_lines(old, new).iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => changes.inserted += 1,
                ChangeTag::Delete => changes.deleted += 1,
                ChangeTag::Equal => {}
            }
        }
        changes
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Render a unified diff with `a/<label>` and `b/<label>` headers.
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(old: &str, new: &str, label: &str) -> String {
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
