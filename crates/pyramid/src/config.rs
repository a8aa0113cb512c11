//! Pyramid generation configuration.
//!
//! Usually loaded from a small YAML file per product:
//!
//! ```yaml
//! out_dir: /data/tiles/icon-eu/t2m
//! min_zoom: 0
//! max_zoom: 6
//! bbox: [-23.5, 29.5, 45.0, 70.5]
//! base_url: ${TILE_BASE_URL:-https://tiles.example.com}/icon-eu/t2m
//! attribution: "&copy; DWD"
//! colormap: colormaps/temperature.txt
//! ```
//!
//! `${VAR}` and `${VAR:-default}` are expanded from the environment before
//! the YAML is parsed.

use crate::error::{PyramidError, PyramidResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tile_common::{BoundingBox, MAX_ZOOM};

/// Default edge length of a rendered tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Path pattern of a tile below the output directory and base URL.
pub const TILE_PATTERN: &str = "{z}/{x}/{y}.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidConfig {
    /// Output directory; its contents are replaced on every run
    pub out_dir: PathBuf,

    #[serde(default)]
    pub min_zoom: u32,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,

    /// Square tile edge in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,

    /// Region to cover; the whole globe when absent
    #[serde(default)]
    pub bbox: Option<BoundingBox>,

    /// Public URL prefix the tiles are served under
    #[serde(default)]
    pub base_url: String,

    /// HTML attribution for the TileJSON and preview page
    #[serde(default)]
    pub attribution: Option<String>,

    /// Colormap whose legend is shown on the preview page
    #[serde(default)]
    pub colormap: Option<PathBuf>,

    /// Render workers per zoom level; 1 renders strictly sequentially
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_max_zoom() -> u32 {
    5
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

fn default_workers() -> usize {
    1
}

impl PyramidConfig {
    /// Configuration with defaults for everything but the output directory.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            min_zoom: 0,
            max_zoom: default_max_zoom(),
            tile_size: DEFAULT_TILE_SIZE,
            bbox: None,
            base_url: String::new(),
            attribution: None,
            colormap: None,
            workers: default_workers(),
        }
    }

    /// Parse YAML, expanding environment variables first.
    pub fn from_yaml_str(yaml: &str) -> PyramidResult<Self> {
        let expanded = expand_env_vars(yaml)?;
        let config: Self = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PyramidResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PyramidError::io(path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> PyramidResult<()> {
        if self.min_zoom > self.max_zoom {
            return Err(PyramidError::InvalidConfig(format!(
                "min_zoom ({}) is greater than max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.max_zoom > MAX_ZOOM {
            return Err(PyramidError::InvalidConfig(format!(
                "max_zoom ({}) exceeds the supported maximum of {}",
                self.max_zoom, MAX_ZOOM
            )));
        }
        if self.tile_size == 0 {
            return Err(PyramidError::InvalidConfig(
                "tile_size must be greater than 0".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(PyramidError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if let Some(bbox) = &self.bbox {
            bbox.validate()
                .map_err(|e| PyramidError::InvalidConfig(e.to_string()))?;
        }
        Ok(())
    }

    /// URL template for the TileJSON `tiles` array.
    pub fn tile_url_template(&self) -> String {
        let mut base = self.base_url.clone();
        if !base.is_empty() && !base.ends_with('/') {
            base.push('/');
        }
        base + TILE_PATTERN
    }

    pub fn zoom_levels(&self) -> std::ops::RangeInclusive<u32> {
        self.min_zoom..=self.max_zoom
    }

    /// On-disk location of a tile.
    pub fn tile_path(&self, z: u32, x: u32, y: u32) -> PathBuf {
        self.out_dir
            .join(z.to_string())
            .join(x.to_string())
            .join(format!("{}.png", y))
    }
}

/// Expand `${VAR}` and `${VAR:-default}` in configuration text.
fn expand_env_vars(content: &str) -> PyramidResult<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut var_expr = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => var_expr.push(c),
                    None => {
                        return Err(PyramidError::InvalidConfig(format!(
                            "unclosed variable substitution: ${{{}",
                            var_expr
                        )))
                    }
                }
            }
            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> PyramidResult<String> {
    if let Some((name, default)) = expr.split_once(":-") {
        match std::env::var(name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).map_err(|_| {
            PyramidError::InvalidConfig(format!("environment variable {} not set", expr.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_yaml() {
        let config = PyramidConfig::from_yaml_str("out_dir: /tmp/tiles\n").unwrap();
        assert_eq!(config, PyramidConfig::new("/tmp/tiles"));
        assert_eq!(config.tile_size, 512);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
out_dir: out
min_zoom: 2
max_zoom: 4
tile_size: 256
bbox: [-8, 55, 0, 60]
base_url: https://tiles.example.com/t2m
attribution: "&copy; DWD"
workers: 4
"#;
        let config = PyramidConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.zoom_levels(), 2..=4);
        assert_eq!(config.bbox, Some(BoundingBox::new(-8.0, 55.0, 0.0, 60.0)));
        assert_eq!(config.attribution.as_deref(), Some("&copy; DWD"));
        assert_eq!(
            config.tile_url_template(),
            "https://tiles.example.com/t2m/{z}/{x}/{y}.png"
        );
    }

    #[test]
    fn test_tile_url_template_without_base() {
        assert_eq!(PyramidConfig::new("x").tile_url_template(), "{z}/{x}/{y}.png");

        let mut config = PyramidConfig::new("x");
        config.base_url = "https://a/b/".to_string();
        assert_eq!(config.tile_url_template(), "https://a/b/{z}/{x}/{y}.png");
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = PyramidConfig::from_yaml_str("out_dir: o\nmin_zoom: 5\nmax_zoom: 3\n").unwrap_err();
        assert!(matches!(err, PyramidError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_tile_size_and_workers() {
        let mut config = PyramidConfig::new("o");
        config.tile_size = 0;
        assert!(config.validate().is_err());

        let mut config = PyramidConfig::new("o");
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zoom_beyond_maximum() {
        let mut config = PyramidConfig::new("o");
        config.max_zoom = MAX_ZOOM + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tile_path_layout() {
        let config = PyramidConfig::new("/srv/tiles");
        assert_eq!(
            config.tile_path(3, 4, 5),
            PathBuf::from("/srv/tiles/3/4/5.png")
        );
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("PYRAMID_TEST_BASE", "https://cdn.example.com");
        let result = expand_env_vars("base_url: ${PYRAMID_TEST_BASE}/t2m").unwrap();
        assert_eq!(result, "base_url: https://cdn.example.com/t2m");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("PYRAMID_TEST_UNSET");
        let result = expand_env_vars("${PYRAMID_TEST_UNSET:-fallback}").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        std::env::remove_var("PYRAMID_TEST_REQUIRED");
        assert!(expand_env_vars("${PYRAMID_TEST_REQUIRED}").is_err());
        assert!(expand_env_vars("${UNCLOSED").is_err());
    }
}
