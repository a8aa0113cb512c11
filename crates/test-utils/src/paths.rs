//! Filesystem helpers for tests that write tile trees.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// The sample colormaps shipped at the workspace root.
pub fn sample_colormap_dir() -> PathBuf {
    workspace_root().join("colormaps")
}

/// A fresh temporary directory, removed when dropped.
pub fn temp_output_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("pyramid-test-")
        .tempdir()
        .expect("failed to create temporary directory")
}

/// Relative `z/x/y.png` paths of every tile below `root`, sorted.
pub fn list_tiles(root: &Path) -> Vec<String> {
    let mut tiles: Vec<String> = WalkDir::new(root)
        .min_depth(3)
        .max_depth(3)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "png"))
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();
    tiles.sort();
    tiles
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent directory");
    }
    std::fs::write(&path, contents).expect("failed to write file");
    path
}
