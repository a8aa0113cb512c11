//! Tile pyramid generation.
//!
//! A run clears the output directory, walks the configured zoom levels in
//! ascending order, renders every covering tile, checks its size, writes it
//! to `{out_dir}/{z}/{x}/{y}.png` and finally emits the TileJSON and preview
//! page. The first error aborts the run and no descriptors are written.

use crate::config::PyramidConfig;
use crate::descriptor::write_descriptors;
use crate::error::{PyramidError, PyramidResult};
use crate::progress::{LevelStats, LogProgress, ProgressReporter};
use colormap::Colormap;
use metrics::{counter, histogram};
use rayon::prelude::*;
use renderer::TileRenderer;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tile_common::{TileCoord, TileCover};
use tracing::{debug, info, warn};

/// Cooperative stop signal, checked before each tile is rendered.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidSummary {
    pub levels: Vec<LevelStats>,
    pub elapsed: Duration,
}

impl PyramidSummary {
    pub fn total_tiles(&self) -> u64 {
        self.levels.iter().map(|l| l.tiles).sum()
    }
}

pub struct PyramidGenerator {
    config: PyramidConfig,
    progress: Arc<dyn ProgressReporter>,
    legend: Option<Arc<Colormap>>,
    cancel: CancellationFlag,
}

impl PyramidGenerator {
    /// Create a generator; the configuration is validated up front.
    pub fn new(config: PyramidConfig) -> PyramidResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            progress: Arc::new(LogProgress),
            legend: None,
            cancel: CancellationFlag::new(),
        })
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Show this colormap's legend on the preview page.
    pub fn with_legend(mut self, colormap: Arc<Colormap>) -> Self {
        self.legend = Some(colormap);
        self
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancel = flag;
        self
    }

    pub fn config(&self) -> &PyramidConfig {
        &self.config
    }

    /// Render the whole pyramid one tile at a time with a single renderer.
    pub fn generate<R: TileRenderer>(&self, renderer: &mut R) -> PyramidResult<PyramidSummary> {
        self.run(|cover, completed| {
            for coord in cover.iter() {
                self.render_tile(renderer, coord, completed, cover.len())?;
            }
            Ok(())
        })
    }

    /// Render each zoom level on `workers` threads.
    ///
    /// Renderers are not assumed to be reentrant: `factory` builds a fresh
    /// one for every unit of work rayon splits a level into, and a renderer
    /// is never shared between threads. With one worker this is the same as
    /// [`generate`](Self::generate).
    pub fn generate_parallel<F, R>(&self, factory: F) -> PyramidResult<PyramidSummary>
    where
        F: Fn() -> R + Send + Sync,
        R: TileRenderer,
    {
        if self.config.workers <= 1 {
            let mut renderer = factory();
            return self.generate(&mut renderer);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("tile-render-{}", i))
            .build()?;

        self.run(|cover, completed| {
            let total = cover.len();
            pool.install(|| {
                cover.iter().par_bridge().try_for_each_init(&factory, |renderer, coord| {
                    self.render_tile(renderer, coord, completed, total)
                })
            })
        })
    }

    /// Shared driver: clear output, run `render_level` per zoom, then write
    /// descriptors.
    fn run<L>(&self, mut render_level: L) -> PyramidResult<PyramidSummary>
    where
        L: FnMut(&TileCover, &AtomicU64) -> PyramidResult<()>,
    {
        let start = Instant::now();
        info!(
            out_dir = %self.config.out_dir.display(),
            min_zoom = self.config.min_zoom,
            max_zoom = self.config.max_zoom,
            tile_size = self.config.tile_size,
            workers = self.config.workers,
            "Starting pyramid generation"
        );

        prepare_output_dir(&self.config.out_dir)?;

        let mut levels = Vec::new();
        for zoom in self.config.zoom_levels() {
            let cover = TileCover::for_zoom(self.config.bbox.as_ref(), zoom);
            let total = cover.len();
            let level_start = Instant::now();
            self.progress.level_started(zoom, total);

            let done = AtomicU64::new(0);
            if let Err(e) = render_level(&cover, &done) {
                warn!(zoom, error = %e, "Pyramid generation aborted");
                return Err(e);
            }

            let stats = LevelStats {
                zoom,
                tiles: done.load(Ordering::SeqCst),
                elapsed: level_start.elapsed(),
            };
            histogram!("pyramid_level_duration_seconds", "zoom" => zoom.to_string())
                .record(stats.elapsed.as_secs_f64());
            self.progress.level_completed(&stats);
            levels.push(stats);
        }

        write_descriptors(&self.config, self.legend.as_deref())?;

        let summary = PyramidSummary {
            levels,
            elapsed: start.elapsed(),
        };
        info!(
            tiles = summary.total_tiles(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Pyramid generation complete"
        );
        Ok(summary)
    }

    fn render_tile<R: TileRenderer>(
        &self,
        renderer: &mut R,
        coord: TileCoord,
        completed: &AtomicU64,
        total: u64,
    ) -> PyramidResult<()> {
        if self.cancel.is_cancelled() {
            return Err(PyramidError::Cancelled);
        }

        let size = self.config.tile_size;
        let bounds = coord.bounds();
        let raster = renderer
            .render(&bounds, size)
            .map_err(|source| PyramidError::Render { tile: coord, source })?;

        let (width, height) = raster
            .verified_dimensions()
            .map_err(|source| PyramidError::Render { tile: coord, source })?;
        if width != size || height != size {
            return Err(PyramidError::RenderSize {
                tile: coord,
                expected: size,
                width,
                height,
            });
        }

        let png = raster
            .to_png()
            .map_err(|source| PyramidError::Render { tile: coord, source })?;

        let path = self.config.tile_path(coord.z, coord.x, coord.y);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PyramidError::io(parent, e))?;
        }
        std::fs::write(&path, &png).map_err(|e| PyramidError::io(&path, e))?;

        counter!("pyramid_tiles_rendered_total").increment(1);
        debug!(tile = %coord, bytes = png.len(), "Rendered tile");

        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress.tile_completed(coord.z, done, total);
        Ok(())
    }
}

/// Empty the output directory, creating it if needed.
fn prepare_output_dir(dir: &Path) -> PyramidResult<()> {
    if !dir.exists() {
        return std::fs::create_dir_all(dir).map_err(|e| PyramidError::io(dir, e));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| PyramidError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PyramidError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| PyramidError::io(&path, e))?;
        let removed = if file_type.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        removed.map_err(|e| PyramidError::io(&path, e))?;
    }
    debug!(path = %dir.display(), "Cleared output directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let clone = flag.clone();
        assert!(!flag.is_cancelled());
        clone.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = PyramidConfig::new("out");
        config.min_zoom = 4;
        config.max_zoom = 2;
        assert!(matches!(
            PyramidGenerator::new(config),
            Err(PyramidError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_prepare_output_dir_clears_contents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("9/1")).unwrap();
        std::fs::write(dir.path().join("9/1/2.png"), b"stale").unwrap();
        std::fs::write(dir.path().join("tilejson.json"), b"{}").unwrap();

        prepare_output_dir(dir.path()).unwrap();

        assert!(dir.path().exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_summary_total() {
        let summary = PyramidSummary {
            levels: vec![
                LevelStats { zoom: 0, tiles: 1, elapsed: Duration::ZERO },
                LevelStats { zoom: 1, tiles: 4, elapsed: Duration::ZERO },
            ],
            elapsed: Duration::ZERO,
        };
        assert_eq!(summary.total_tiles(), 5);
    }
}
