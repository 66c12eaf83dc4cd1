use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to fetch {origin}")]
    Fetch {
        origin: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to parse selector {selector}: {message}")]
    Parse { selector: String, message: String },

    #[error("Failed to {action} {}", .path.display())]
    FileIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("Fetch task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<::config::ConfigError> for UpdateError {
    fn from(err: ::config::ConfigError) -> Self {
        UpdateError::Config(err.to_string())
    }
}

impl UpdateError {
    pub fn fetch(
        origin: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        UpdateError::Fetch {
            origin: origin.into(),
            cause: cause.into(),
        }
    }

    pub fn file_io(action: &'static str, path: impl Into<PathBuf>, cause: io::Error) -> Self {
        UpdateError::FileIo {
            action,
            path: path.into(),
            cause,
        }
    }
}
