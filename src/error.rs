//! Error types for edr-bo-extract.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for extraction setup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing gazetteers, categorizers and parsers.
///
/// Per-record extraction never fails; only loading static resources does.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A word list or profile is missing, unreadable, or not UTF-8.
    #[error("Resource unavailable: {}: {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile is well-formed YAML but describes an unusable setup.
    #[error("Config error: {0}")]
    Config(String),

    /// Profile is not valid YAML for the expected schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
