//! Error types for the Wumpus agent crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the Wumpus agent crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("parameters unavailable at {path:?}: {source}")]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value '{value}' for parameter '{name}': {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to load model from {path:?}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("malformed model row at line {line}: expected {expected} numeric tokens, got {got}")]
    MalformedModelRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("failed to save model to {path:?}: {source}")]
    ModelSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{axis} coordinate {value} is outside the encodable range 0..={max}")]
    CoordinateOutOfRange { axis: char, value: i32, max: u32 },

    #[error("invalid action '{input}'. Expected one of: {expected}")]
    ParseAction { input: String, expected: String },

    #[error("invalid state field '{input}'. Expected one of: {expected}")]
    ParseStateField { input: String, expected: String },

    #[error("invalid action set '{input}'. Expected one of: {expected}")]
    ParseActionSet { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
