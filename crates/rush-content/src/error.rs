//! Error types for rush-content

/// Result type for rush-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rush-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse JSON at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Duplicate key \"{key}\" at line {line}, column {column}")]
    DuplicateKey {
        key: String,
        line: usize,
        column: usize,
    },
}

impl Error {
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            column,
            message: message.into(),
        }
    }
}
