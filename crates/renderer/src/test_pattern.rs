//! A deterministic synthetic backend.
//!
//! Colors each pixel from its own longitude/latitude, so adjacent tiles join
//! seamlessly and misplaced tiles are obvious, and outlines every tile so
//! the grid is visible in a map viewer.

use crate::{Raster, RenderError, TileRenderer};
use tile_common::BoundingBox;

/// Renders a lon/lat gradient with tile outlines.
#[derive(Debug, Clone)]
pub struct TestPatternRenderer {
    /// Alpha applied to the gradient fill
    pub fill_alpha: u8,
    /// Outline width in pixels, 0 disables outlines
    pub border_px: u32,
    tiles_rendered: u64,
}

impl Default for TestPatternRenderer {
    fn default() -> Self {
        Self {
            fill_alpha: 160,
            border_px: 1,
            tiles_rendered: 0,
        }
    }
}

impl TestPatternRenderer {
    pub fn new(fill_alpha: u8, border_px: u32) -> Self {
        Self {
            fill_alpha,
            border_px,
            tiles_rendered: 0,
        }
    }

    /// Number of tiles this instance has rendered.
    pub fn tiles_rendered(&self) -> u64 {
        self.tiles_rendered
    }
}

/// Web-Mercator y for a latitude in degrees.
fn mercator_y(lat: f64) -> f64 {
    lat.to_radians().tan().asinh()
}

fn mercator_lat(y: f64) -> f64 {
    y.sinh().atan().to_degrees()
}

impl TileRenderer for TestPatternRenderer {
    fn render(&mut self, bounds: &BoundingBox, size_px: u32) -> Result<Raster, RenderError> {
        if size_px == 0 {
            return Err(RenderError::Backend("tile size must be positive".to_string()));
        }

        let size = size_px as usize;
        let mut pixels = vec![0u8; size * size * 4];

        let y_north = mercator_y(bounds.north);
        let y_south = mercator_y(bounds.south);
        let lon_span = bounds.east - bounds.west;

        for row in 0..size {
            let t = (row as f64 + 0.5) / size as f64;
            let lat = mercator_lat(y_north + (y_south - y_north) * t);
            let g = ((lat + 90.0) / 180.0 * 255.0).round().clamp(0.0, 255.0) as u8;

            for col in 0..size {
                let lon = bounds.west + lon_span * (col as f64 + 0.5) / size as f64;
                let r = ((lon + 180.0) / 360.0 * 255.0).round().clamp(0.0, 255.0) as u8;

                let border = self.border_px as usize;
                let on_edge = border > 0
                    && (row < border || col < border || row >= size - border || col >= size - border);

                let idx = (row * size + col) * 4;
                let px = if on_edge {
                    [40, 40, 40, 255]
                } else {
                    [r, g, 128, self.fill_alpha]
                };
                pixels[idx..idx + 4].copy_from_slice(&px);
            }
        }

        self.tiles_rendered += 1;
        tracing::trace!(
            west = bounds.west,
            south = bounds.south,
            east = bounds.east,
            north = bounds.north,
            size_px,
            "Rendered test pattern tile"
        );

        Raster::from_rgba(size_px, size_px, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_requested_size() {
        let mut renderer = TestPatternRenderer::default();
        let raster = renderer
            .render(&BoundingBox::new(-10.0, 40.0, 0.0, 50.0), 64)
            .unwrap();
        assert_eq!(raster.dimensions(), (64, 64));
        assert_eq!(renderer.tiles_rendered(), 1);
    }

    #[test]
    fn test_border_and_fill() {
        let mut renderer = TestPatternRenderer::new(200, 2);
        let raster = renderer.render(&BoundingBox::global(), 16).unwrap();
        let Raster::Rgba { pixels, .. } = raster else {
            panic!("expected raw pixels");
        };

        assert_eq!(&pixels[0..4], &[40, 40, 40, 255]);
        let center = (8 * 16 + 8) * 4;
        assert_eq!(pixels[center + 3], 200);
    }

    #[test]
    fn test_zero_size_is_an_error() {
        let mut renderer = TestPatternRenderer::default();
        assert!(renderer.render(&BoundingBox::global(), 0).is_err());
    }

    #[test]
    fn test_mercator_round_trip() {
        for lat in [-80.0, -45.0, 0.0, 30.0, 85.0] {
            assert!((mercator_lat(mercator_y(lat)) - lat).abs() < 1e-9);
        }
    }
}
