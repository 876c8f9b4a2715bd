//! Error types for poster composition and diagram fetching

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for poster and renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a compose or fetch run
#[derive(Error, Debug)]
pub enum Error {
    /// A required input image or source document does not exist
    #[error("Missing input: {} not found", .0.display())]
    MissingInput(PathBuf),

    /// The source document has fewer fenced blocks than requested
    #[error("Could not find `{language}` diagram block #{required} (document has {found})")]
    Extraction {
        language: String,
        found: usize,
        required: usize,
    },

    /// The rendering endpoint answered with a non-200 status
    #[error("Remote renderer returned {status}: {body}")]
    RemoteFetch { status: u16, body: String },

    /// Transport-level failure talking to the rendering endpoint
    #[error("Network error: {0}")]
    NetworkError(String),

    /// An input raster could not be decoded
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The canvas could not be encoded to the output format
    #[error("Failed to encode output: {0}")]
    Encode(String),

    /// Filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}
