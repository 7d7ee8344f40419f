//! Error types

use thiserror::Error;

/// Errors from the fallible edges of the library: clipboard backends and
/// configuration loading. The table and merge engines never fail.
#[derive(Debug, Error)]
pub enum WeftError {
    /// The clipboard backend refused the write.
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration document was valid JSON but not an object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WeftError>;
