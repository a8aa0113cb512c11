//! Common types shared across the weather tiling crates.
//!
//! Everything in here is pure math: bounding boxes in degrees, slippy-map
//! tile addressing and the Web-Mercator transforms that connect the two.

pub mod bbox;
pub mod error;
pub mod tile;

pub use bbox::BoundingBox;
pub use error::{TileError, TileResult};
pub use tile::{TileCoord, TileCover, TileRange, MAX_LATITUDE, MAX_ZOOM};
