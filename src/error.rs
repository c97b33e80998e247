//! Error types for the treeseek crate

use thiserror::Error;

/// Main error type for the treeseek crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action index {action} (expected 0-{max})")]
    InvalidAction { action: usize, max: usize },

    #[error("episode already terminated: reset the session before stepping")]
    EpisodeDone,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("evaluation requires at least one episode")]
    NoEpisodes,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
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
