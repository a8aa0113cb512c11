//! Slippy-map tile pyramid generation.
//!
//! [`PyramidGenerator`] renders every tile covering a region for a range of
//! zoom levels through a [`renderer::TileRenderer`], writes them as
//! `{z}/{x}/{y}.png` and publishes a TileJSON document plus a Leaflet
//! preview page once all levels succeeded.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod progress;

pub use config::{PyramidConfig, DEFAULT_TILE_SIZE, TILE_PATTERN};
pub use descriptor::{render_preview_page, write_descriptors, TileJson, PREVIEW_FILE, TILEJSON_FILE};
pub use error::{PyramidError, PyramidResult};
pub use generator::{CancellationFlag, PyramidGenerator, PyramidSummary};
pub use progress::{LevelStats, LogProgress, NoProgress, ProgressReporter};
