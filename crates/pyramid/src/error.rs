//! Error types for pyramid generation.

use renderer::RenderError;
use std::path::PathBuf;
use thiserror::Error;
use tile_common::TileCoord;

/// Result type alias using PyramidError.
pub type PyramidResult<T> = Result<T, PyramidError>;

/// Every variant is fatal to the run; nothing is retried and no descriptors
/// are written once one is raised.
#[derive(Debug, Error)]
pub enum PyramidError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Tile {tile}: expected {expected}x{expected} raster, got {width}x{height}")]
    RenderSize {
        tile: TileCoord,
        expected: u32,
        width: u32,
        height: u32,
    },

    #[error("Tile {tile}: rendering failed: {source}")]
    Render {
        tile: TileCoord,
        #[source]
        source: RenderError,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize TileJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to start render workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Generation cancelled")]
    Cancelled,
}

impl PyramidError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PyramidError::Io {
            path: path.into(),
            source,
        }
    }
}
