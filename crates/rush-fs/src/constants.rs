//! Well-known file names inside a Rush workspace.

use std::path::Path;

/// Files rush-api reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushPath {
    /// `rush.json`, the workspace marker and configuration file
    RushJson,
    /// `.eslintrc.json`, written into project folders by lint presets
    EslintRc,
}

impl RushPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RushJson => "rush.json",
            Self::EslintRc => ".eslintrc.json",
        }
    }
}

impl AsRef<Path> for RushPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RushPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RushPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
