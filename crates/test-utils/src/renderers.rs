//! Fake tile renderers.

use renderer::{Raster, RenderError, TileRenderer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tile_common::BoundingBox;

/// Renders a solid-color raster of exactly the requested size.
#[derive(Debug, Clone)]
pub struct FixedSizeRenderer {
    pub rgba: [u8; 4],
    calls: Arc<AtomicU64>,
}

impl FixedSizeRenderer {
    pub fn new(rgba: [u8; 4]) -> Self {
        Self {
            rgba,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total renders across this renderer and all its clones.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FixedSizeRenderer {
    fn default() -> Self {
        Self::new([30, 90, 200, 160])
    }
}

impl TileRenderer for FixedSizeRenderer {
    fn render(&mut self, _bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let pixels = self.rgba.repeat(size_px as usize * size_px as usize);
        Raster::from_rgba(size_px, size_px, pixels)
    }
}

/// Always returns a raster of a fixed size, whatever was requested.
#[derive(Debug, Clone, Copy)]
pub struct WrongSizeRenderer {
    pub width: u32,
    pub height: u32,
}

impl WrongSizeRenderer {
    /// One pixel short of `size` in both directions.
    pub fn off_by_one(size: u32) -> Self {
        Self {
            width: size - 1,
            height: size - 1,
        }
    }
}

impl TileRenderer for WrongSizeRenderer {
    fn render(&mut self, _bounds: &BoundingBox, _size_px: u32) -> Result<Raster, RenderError> {
        Ok(Raster::transparent(self.width, self.height))
    }
}

/// Succeeds `ok_renders` times, then fails with a backend error.
#[derive(Debug, Clone)]
pub struct FailingRenderer {
    pub ok_renders: u64,
    rendered: u64,
}

impl FailingRenderer {
    pub fn after(ok_renders: u64) -> Self {
        Self {
            ok_renders,
            rendered: 0,
        }
    }
}

impl TileRenderer for FailingRenderer {
    fn render(&mut self, _bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError> {
        if self.rendered >= self.ok_renders {
            return Err(RenderError::Backend("plot backend crashed".to_string()));
        }
        self.rendered += 1;
        Ok(Raster::transparent(size_px, size_px))
    }
}

/// One recorded render request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub bounds: BoundingBox,
    pub size_px: u32,
}

/// Records every request and returns transparent rasters. Clones share the
/// same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TileRenderer for RecordingRenderer {
    fn render(&mut self, bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError> {
        self.calls.lock().unwrap().push(RenderCall {
            bounds: *bounds,
            size_px,
        });
        Ok(Raster::transparent(size_px, size_px))
    }
}
