//! Ancestor-directory search for workspace markers

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Search `start` and each of its ancestors for a file named `marker`.
///
/// `start` is canonicalized first, so relative paths and `..` segments
/// resolve against the real filesystem. When `start` is a file the search
/// begins in its parent directory. Returns `Ok(None)` when the filesystem
/// root is reached without a match.
pub fn find_up(start: &Path, marker: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let marker = marker.as_ref();
    let canonical = dunce::canonicalize(start).map_err(|e| Error::io(start, e))?;

    let mut current = if canonical.is_file() {
        canonical.parent().map(Path::to_path_buf)
    } else {
        Some(canonical)
    };

    while let Some(dir) = current {
        let candidate = dir.join(marker);
        if candidate.is_file() {
            tracing::debug!(found = %candidate.display(), "marker located");
            return Ok(Some(candidate));
        }
        current = dir.parent().map(Path::to_path_buf);
    }

    tracing::debug!(start = %start.display(), marker = %marker.display(), "marker not found");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_marker_in_start_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("rush.json"), "{}").unwrap();

        let found = find_up(temp.path(), "rush.json").unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "rush.json");
    }

    #[test]
    fn ignores_directory_named_like_marker() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a");
        fs::create_dir_all(nested.join("rush.json")).unwrap();
        fs::write(temp.path().join("rush.json"), "{}").unwrap();

        let found = find_up(&nested, "rush.json").unwrap().unwrap();
        assert_eq!(found, dunce::canonicalize(temp.path()).unwrap().join("rush.json"));
    }

    #[test]
    fn missing_start_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = find_up(&temp.path().join("nope"), "rush.json").unwrap_err();
        assert!(err.is_not_found());
    }
}
