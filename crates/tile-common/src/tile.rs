//! Slippy-map tile addressing and Web-Mercator transforms.
//!
//! Tiles are addressed by `(z, x, y)` with the origin at the northwest
//! corner, `y` increasing southward and `2^z` tiles along each axis.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Northernmost latitude representable in Web Mercator.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Highest zoom level supported. Keeps `2^z` within `u32`.
pub const MAX_ZOOM: u32 = 30;

/// Nudge applied to the east/south edges so an edge lying exactly on a tile
/// boundary does not pull in the neighbouring tile.
const EDGE_EPSILON: f64 = 1e-11;

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Relative path of the tile without extension, `z/x/y`.
    pub fn path_fragment(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }

    /// Geographic bounds of this tile.
    pub fn bounds(&self) -> BoundingBox {
        tile_bounds(self)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Number of tiles along one axis at `zoom`.
pub fn tiles_per_axis(zoom: u32) -> u32 {
    1u32 << zoom
}

/// Forward Web-Mercator transform into fractional tile space.
///
/// Latitudes are clamped to [`MAX_LATITUDE`] so the poles map to the grid
/// edges instead of infinity.
pub fn lonlat_to_tile_fraction(lon: f64, lat: f64, zoom: u32) -> (f64, f64) {
    let n = tiles_per_axis(zoom) as f64;
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = (lon + 180.0) / 360.0 * n;
    let y = (1.0 - lat.to_radians().tan().asinh() / PI) / 2.0 * n;
    (x, y)
}

/// Convert lon/lat to the tile containing it, clamped into the grid.
pub fn lonlat_to_tile(lon: f64, lat: f64, zoom: u32) -> TileCoord {
    let (fx, fy) = lonlat_to_tile_fraction(lon, lat, zoom);
    TileCoord {
        z: zoom,
        x: clamp_index(fx, zoom),
        y: clamp_index(fy, zoom),
    }
}

fn clamp_index(fraction: f64, zoom: u32) -> u32 {
    let max = i64::from(tiles_per_axis(zoom)) - 1;
    (fraction.floor() as i64).clamp(0, max) as u32
}

/// Inverse Web-Mercator: latitude of the northern edge of tile row `y`.
fn row_to_lat(y: u32, n: f64) -> f64 {
    (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan().to_degrees()
}

fn column_to_lon(x: u32, n: f64) -> f64 {
    x as f64 / n * 360.0 - 180.0
}

/// Geographic bounds of a tile, from inverse-projecting its corners.
pub fn tile_bounds(coord: &TileCoord) -> BoundingBox {
    let n = tiles_per_axis(coord.z) as f64;

    BoundingBox::new(
        column_to_lon(coord.x, n),
        row_to_lat(coord.y + 1, n),
        column_to_lon(coord.x + 1, n),
        row_to_lat(coord.y, n),
    )
}

/// An inclusive rectangle of tile indices at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub z: u32,
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl TileRange {
    /// The complete `2^z × 2^z` grid.
    pub fn full(z: u32) -> Self {
        let max = tiles_per_axis(z) - 1;
        Self {
            z,
            min_x: 0,
            max_x: max,
            min_y: 0,
            max_y: max,
        }
    }

    /// Tiles covering a box that does not cross the antimeridian.
    ///
    /// Indices are clamped, never wrapped. A zero-area box still yields the
    /// single tile containing it.
    pub fn covering(bbox: &BoundingBox, z: u32) -> Self {
        let west = bbox.west.clamp(-180.0, 180.0);
        let east = bbox.east.clamp(-180.0, 180.0);
        let north = bbox.north.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let south = bbox.south.clamp(-MAX_LATITUDE, MAX_LATITUDE);

        let (x0, y0) = lonlat_to_tile_fraction(west, north, z);
        let (x1, y1) = lonlat_to_tile_fraction(east - EDGE_EPSILON, south + EDGE_EPSILON, z);

        let min_x = clamp_index(x0, z);
        let min_y = clamp_index(y0, z);

        Self {
            z,
            min_x,
            max_x: clamp_index(x1, z).max(min_x),
            min_y,
            max_y: clamp_index(y1, z).max(min_y),
        }
    }

    pub fn width(&self) -> u64 {
        u64::from(self.max_x - self.min_x) + 1
    }

    pub fn height(&self) -> u64 {
        u64::from(self.max_y - self.min_y) + 1
    }

    pub fn len(&self) -> u64 {
        self.width() * self.height()
    }

    /// A range always holds at least one tile.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        coord.z == self.z
            && (self.min_x..=self.max_x).contains(&coord.x)
            && (self.min_y..=self.max_y).contains(&coord.y)
    }

    /// Iterate column by column, north to south within each column.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let z = self.z;
        (self.min_x..=self.max_x)
            .flat_map(move |x| (self.min_y..=self.max_y).map(move |y| TileCoord { z, x, y }))
    }
}

/// The set of tiles needed to cover a region at one zoom level.
///
/// Usually a single [`TileRange`]; antimeridian-crossing boxes produce two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCover {
    pub zoom: u32,
    pub ranges: Vec<TileRange>,
}

impl TileCover {
    /// Compute the cover for `bbox` at `zoom`, or the full grid when absent.
    pub fn for_zoom(bbox: Option<&BoundingBox>, zoom: u32) -> Self {
        let ranges = match bbox {
            None => vec![TileRange::full(zoom)],
            Some(bbox) => bbox
                .split_antimeridian()
                .iter()
                .map(|part| TileRange::covering(part, zoom))
                .collect(),
        };
        Self { zoom, ranges }
    }

    pub fn len(&self) -> u64 {
        self.ranges.iter().map(TileRange::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.ranges.iter().flat_map(TileRange::iter)
    }
}
