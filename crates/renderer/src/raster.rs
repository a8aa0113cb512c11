//! Rasters returned by tile renderers.

use crate::png::{create_png_auto, read_png_dimensions};
use crate::RenderError;
use std::borrow::Cow;

/// A square (or at least rectangular) image produced for one tile.
///
/// Backends either hand back raw RGBA pixels, which are encoded here, or an
/// image they already encoded as PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    /// Row-major RGBA, 4 bytes per pixel.
    Rgba {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    /// An encoded PNG; dimensions come from its IHDR chunk.
    Png {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
}

impl Raster {
    /// Wrap RGBA pixels, checking the buffer length against the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Raster::Rgba {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an encoded PNG.
    pub fn from_png(data: Vec<u8>) -> Result<Self, RenderError> {
        let (width, height) = read_png_dimensions(&data)?;
        Ok(Raster::Png {
            width,
            height,
            data,
        })
    }

    /// A fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> Self {
        Raster::Rgba {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Raster::Rgba { width, .. } | Raster::Png { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Raster::Rgba { height, .. } | Raster::Png { height, .. } => *height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Dimensions of the actual image content.
    ///
    /// The variant fields are public, so a backend can fill in `width` and
    /// `height` that disagree with the payload. This reads the IHDR header of
    /// encoded data and checks the pixel buffer length of raw data.
    pub fn verified_dimensions(&self) -> Result<(u32, u32), RenderError> {
        match self {
            Raster::Rgba {
                width,
                height,
                pixels,
            } => {
                let expected = *width as usize * *height as usize * 4;
                if pixels.len() != expected {
                    return Err(RenderError::BufferSize {
                        expected,
                        actual: pixels.len(),
                    });
                }
                Ok((*width, *height))
            }
            Raster::Png { data, .. } => read_png_dimensions(data),
        }
    }

    /// PNG bytes for this raster, encoding only when needed.
    pub fn to_png(&self) -> Result<Cow<'_, [u8]>, RenderError> {
        match self {
            Raster::Rgba {
                width,
                height,
                pixels,
            } => Ok(Cow::Owned(create_png_auto(pixels, *width, *height)?)),
            Raster::Png { data, .. } => Ok(Cow::Borrowed(data)),
        }
    }
}
