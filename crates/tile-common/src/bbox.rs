//! Geographic bounding boxes.

use crate::error::{TileError, TileResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An axis-aligned geographic rectangle in degrees of longitude/latitude.
///
/// Serializes as `[west, south, east, north]`, which is the order used by
/// TileJSON `bounds` and by the pyramid YAML configuration.
///
/// A box with `west > east` crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Create a new bounding box from its edges.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// The whole globe.
    pub fn global() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// A zero-area box around a single point.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, lon, lat)
    }

    /// Longitudinal extent in degrees, accounting for antimeridian crossing.
    pub fn width(&self) -> f64 {
        let b = self.normalize_antimeridian_edges();
        if b.west > b.east {
            (180.0 - b.west) + (b.east + 180.0)
        } else {
            b.east - b.west
        }
    }

    /// Latitudinal extent in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// True when the box wraps across ±180°.
    ///
    /// An east edge of -180 or a west edge of 180 sits on the antimeridian
    /// itself and does not make the box cross it.
    pub fn crosses_antimeridian(&self) -> bool {
        let normalized = self.normalize_antimeridian_edges();
        normalized.west > normalized.east
    }

    /// Move an east edge at -180 to 180 and a west edge at 180 to -180.
    fn normalize_antimeridian_edges(&self) -> BoundingBox {
        let west = if self.west == 180.0 && self.east != 180.0 {
            -180.0
        } else {
            self.west
        };
        let east = if self.east == -180.0 && west != -180.0 {
            180.0
        } else {
            self.east
        };
        BoundingBox::new(west, self.south, east, self.north)
    }

    /// Center point as `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        let mut lon = self.west + self.width() / 2.0;
        if lon > 180.0 {
            lon -= 360.0;
        }
        (lon, (self.south + self.north) / 2.0)
    }

    /// Check that all edges are finite and within geographic range.
    pub fn validate(&self) -> TileResult<()> {
        let edges = [self.west, self.south, self.east, self.north];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(TileError::InvalidBbox(format!(
                "non-finite coordinate in {:?}",
                edges
            )));
        }
        if self.south > self.north {
            return Err(TileError::InvalidBbox(format!(
                "south ({}) is greater than north ({})",
                self.south, self.north
            )));
        }
        if self.south < -90.0 || self.north > 90.0 {
            return Err(TileError::InvalidBbox(format!(
                "latitude outside [-90, 90]: {}..{}",
                self.south, self.north
            )));
        }
        if self.west.abs() > 180.0 || self.east.abs() > 180.0 {
            return Err(TileError::InvalidBbox(format!(
                "longitude outside [-180, 180]: {}..{}",
                self.west, self.east
            )));
        }
        Ok(())
    }

    /// Split an antimeridian-crossing box into its eastern and western halves.
    ///
    /// Boxes that do not cross are returned as a single element, with an
    /// edge lying on the antimeridian moved to the side that keeps the box
    /// non-crossing.
    pub fn split_antimeridian(&self) -> Vec<BoundingBox> {
        let normalized = self.normalize_antimeridian_edges();
        if normalized.west > normalized.east {
            vec![
                BoundingBox::new(normalized.west, self.south, 180.0, self.north),
                BoundingBox::new(-180.0, self.south, normalized.east, self.north),
            ]
        } else {
            vec![normalized]
        }
    }

    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        let in_lat = lat >= self.south && lat <= self.north;
        let b = self.normalize_antimeridian_edges();
        let in_lon = if b.west > b.east {
            lon >= b.west || lon <= b.east
        } else {
            lon >= b.west && lon <= b.east
        };
        in_lat && in_lon
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}

/// Parse a `"west,south,east,north"` string.
impl FromStr for BoundingBox {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(TileError::InvalidFormat(s.to_string()));
        }

        let mut edges = [0.0f64; 4];
        for (edge, part) in edges.iter_mut().zip(&parts) {
            *edge = part
                .parse()
                .map_err(|_| TileError::InvalidNumber(part.to_string()))?;
        }
        Ok(Self::from(edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_antimeridian_edges_are_normalized() {
        let east_edge = BoundingBox::new(170.0, -10.0, -180.0, 10.0);
        assert_eq!(
            east_edge.split_antimeridian(),
            vec![BoundingBox::new(170.0, -10.0, 180.0, 10.0)]
        );
        assert!(east_edge.contains_point(175.0, 0.0));
        assert!(!east_edge.contains_point(-175.0, 0.0));
        assert!((east_edge.center().0 - 175.0).abs() < 1e-9);

        let west_edge = BoundingBox::new(180.0, -10.0, -170.0, 10.0);
        assert_eq!(
            west_edge.split_antimeridian(),
            vec![BoundingBox::new(-180.0, -10.0, -170.0, 10.0)]
        );

        let global = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
        assert_eq!(global.split_antimeridian(), vec![global]);
    }

    #[test]
    fn test_parse_bbox() {
        let bbox: BoundingBox = "-23.5,29.5,45.0,70.5".parse().unwrap();
        assert_eq!(bbox.west, -23.5);
        assert_eq!(bbox.south, 29.5);
        assert_eq!(bbox.east, 45.0);
        assert_eq!(bbox.north, 70.5);
    }

    #[test]
    fn test_center_across_antimeridian() {
        let bbox = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
        let (lon, lat) = bbox.center();
        assert!((lon.abs() - 180.0).abs() < 1e-9);
        assert_eq!(lat, 0.0);
        assert!((bbox.width() - 20.0).abs() < 1e-9);
    }
}
