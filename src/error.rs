//! Error types shared by the observers, render backends and surfaces.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing, driving or tearing down an observer.
#[derive(Error, Debug)]
pub enum ObserverError {
    /// Malformed point sets handed to a constructor
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The display or graphics backend could not be initialized
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// Frame directory or frame file could not be written
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image encoder rejected a frame
    #[error("Image encoding error: {0}")]
    ImageEncoding(String),

    /// Rasterization or presentation failed
    #[error("Render error: {0}")]
    Render(String),

    /// A transformation returned a different number of points than it was given
    #[error("Transformation produced {actual} points, expected {expected}")]
    PointCountMismatch { expected: usize, actual: usize },

    /// Geometry handle not registered with the scene
    #[error("Unknown geometry id {0}")]
    UnknownGeometry(usize),

    /// Observer was used after its surface was released
    #[error("Observer is closed")]
    Closed,

    /// Options file unreadable or malformed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ObserverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ObserverError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(msg: impl Into<String>) -> Self {
        ObserverError::Render(msg.into())
    }

    pub(crate) fn unavailable(msg: impl Into<String>) -> Self {
        ObserverError::RendererUnavailable(msg.into())
    }
}

impl From<image::ImageError> for ObserverError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => ObserverError::io(PathBuf::new(), e),
            other => ObserverError::ImageEncoding(other.to_string()),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ObserverError>;
