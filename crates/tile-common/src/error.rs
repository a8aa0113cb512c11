//! Error types for tile and bounding box handling.

use thiserror::Error;

/// Result type alias using TileError.
pub type TileResult<T> = Result<T, TileError>;

#[derive(Debug, Error, PartialEq)]
pub enum TileError {
    #[error("Invalid bounding box format: {0}. Expected 'west,south,east,north'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Zoom level {zoom} exceeds maximum of {max}")]
    ZoomOutOfRange { zoom: u32, max: u32 },
}
