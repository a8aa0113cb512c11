//! Tile rendering capability for the pyramid generator.
//!
//! The generator never talks to a plotting backend directly. It only needs
//! something that turns geographic bounds and a pixel size into a raster:
//! the [`TileRenderer`] trait. Each backend gets its own adapter; this crate
//! ships the [`TestPatternRenderer`] used for smoke runs and previews.

pub mod png;
pub mod raster;
pub mod test_pattern;

pub use raster::Raster;
pub use test_pattern::TestPatternRenderer;

use thiserror::Error;
use tile_common::BoundingBox;

/// Errors raised while producing or encoding a raster.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Rendering backend failed: {0}")]
    Backend(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Invalid PNG data: {0}")]
    InvalidPng(String),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces the raster for one tile.
///
/// Implementations may be stateful and non-reentrant (a backend that
/// configures a shared output target before each plot), hence `&mut self`.
/// Callers request a square `size_px × size_px` image and treat any other
/// size as a fatal contract violation.
pub trait TileRenderer {
    fn render(&mut self, bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError>;
}

impl<R: TileRenderer + ?Sized> TileRenderer for &mut R {
    fn render(&mut self, bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError> {
        (**self).render(bounds, size_px)
    }
}

impl<R: TileRenderer + ?Sized> TileRenderer for Box<R> {
    fn render(&mut self, bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError> {
        (**self).render(bounds, size_px)
    }
}
