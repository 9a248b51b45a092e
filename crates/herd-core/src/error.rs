//! Error types for Herd

use thiserror::Error;

/// The main error type for Herd operations
#[derive(Debug, Error)]
pub enum HerdError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Duplicate sequence id {id} ('{name}')")]
    DuplicateSequence { id: i32, name: String },

    #[error("Sequence library error: {0}")]
    LibraryError(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Herd operations
pub type Result<T> = std::result::Result<T, HerdError>;

impl From<toml::de::Error> for HerdError {
    fn from(err: toml::de::Error) -> Self {
        HerdError::TomlParseError(err.to_string())
    }
}
