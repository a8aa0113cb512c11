//! Single-line terminal progress.

use pyramid::{LevelStats, ProgressReporter};
use std::io::Write;

/// Rewrites one stderr line per zoom level, then prints the level timing.
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl ProgressReporter for TerminalProgress {
    fn tile_completed(&self, zoom: u32, done: u64, total: u64) {
        let width = total.to_string().len();
        let mut err = std::io::stderr().lock();
        let _ = write!(
            err,
            "\rGenerating zoom level {}: {:>width$} / {}",
            zoom,
            done,
            total,
            width = width
        );
        let _ = err.flush();
    }

    fn level_completed(&self, stats: &LevelStats) {
        eprintln!();
        eprintln!(
            "Generated zoom level {} in {:.2}s ({:.2}s per tile on average)",
            stats.zoom,
            stats.elapsed.as_secs_f64(),
            stats.per_tile().as_secs_f64()
        );
    }
}
