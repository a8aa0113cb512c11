//! Progress reporting for pyramid runs.
//!
//! Purely observational: reporters never influence control flow.

use std::time::Duration;
use tracing::{debug, info};

/// Timing for one completed zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub zoom: u32,
    pub tiles: u64,
    pub elapsed: Duration,
}

impl LevelStats {
    /// Average wall-clock time per tile.
    pub fn per_tile(&self) -> Duration {
        if self.tiles == 0 {
            return Duration::ZERO;
        }
        self.elapsed.div_f64(self.tiles as f64)
    }
}

/// Receives progress events. Must be shareable across render workers.
pub trait ProgressReporter: Send + Sync {
    fn level_started(&self, _zoom: u32, _total: u64) {}

    /// Called after each tile is written; `done` counts tiles finished so far
    /// in this level.
    fn tile_completed(&self, zoom: u32, done: u64, total: u64);

    fn level_completed(&self, stats: &LevelStats);
}

/// Reports through `tracing`: per-tile progress at debug level, a summary
/// per level at info.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn level_started(&self, zoom: u32, total: u64) {
        info!(zoom, tiles = total, "Generating zoom level");
    }

    fn tile_completed(&self, zoom: u32, done: u64, total: u64) {
        debug!(zoom, done, total, "Tile written");
    }

    fn level_completed(&self, stats: &LevelStats) {
        info!(
            zoom = stats.zoom,
            tiles = stats.tiles,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            per_tile_ms = format!("{:.2}", stats.per_tile().as_secs_f64() * 1000.0),
            "Generated zoom level"
        );
    }
}

/// Discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn tile_completed(&self, _zoom: u32, _done: u64, _total: u64) {}

    fn level_completed(&self, _stats: &LevelStats) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_tile_average() {
        let stats = LevelStats {
            zoom: 3,
            tiles: 4,
            elapsed: Duration::from_millis(100),
        };
        assert_eq!(stats.per_tile(), Duration::from_millis(25));
    }

    #[test]
    fn test_per_tile_with_no_tiles() {
        let stats = LevelStats {
            zoom: 0,
            tiles: 0,
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(stats.per_tile(), Duration::ZERO);
    }
}
