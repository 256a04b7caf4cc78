//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes, repeated separators collapse and
/// `.` segments are dropped, so `apps\\web/./` and `apps/web` compare equal.
/// A leading `//` (UNC share) is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        Self {
            inner: clean(&raw),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = Self::new(segment);
        if self.inner.is_empty() {
            return segment;
        }
        if segment.inner.is_empty() {
            return self.clone();
        }
        if self.inner.ends_with('/') {
            Self::new(format!("{}{}", self.inner, segment.inner))
        } else {
            Self::new(format!("{}/{}", self.inner, segment.inner))
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) if idx > 0 && !self.is_share_root() => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Iterate over the non-empty segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments, e.g. `apps/web` has depth 2.
    pub fn depth(&self) -> usize {
        self.segments().filter(|s| *s != ".").count()
    }

    /// True for `/...` and `//share/...` paths and for drive-letter paths.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || self.to_native().is_absolute()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    fn is_share_root(&self) -> bool {
        self.inner == "//" || (self.inner.starts_with("//") && self.inner[2..].find('/').is_none())
    }
}

fn clean(raw: &str) -> String {
    let (prefix, rest) = if raw.starts_with("//") && !raw.starts_with("///") {
        ("//", &raw[2..])
    } else if raw.starts_with('/') {
        ("/", raw.trim_start_matches('/'))
    } else {
        ("", raw)
    };

    let joined = rest
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/");

    if prefix.is_empty() && joined.is_empty() && !raw.is_empty() {
        return ".".to_string();
    }
    format!("{prefix}{joined}")
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
