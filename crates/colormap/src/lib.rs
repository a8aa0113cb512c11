//! Colormaps for weather raster products.
//!
//! A [`Colormap`] is an ordered list of value -> HSLA stops with a physical
//! unit. It is parsed once from its text format and then only read: exported
//! as a GDAL color table for the colorization step, or rendered as an HTML
//! legend.

pub mod color;
pub mod colormap;
pub mod entry;
pub mod error;
pub mod gdal;
pub mod legend;
pub mod preview;
pub mod windy;

pub use color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
pub use colormap::Colormap;
pub use entry::{ColorEntry, ColorValue, NO_DATA_LITERAL};
pub use error::{ColormapError, FormatError, WindyImportError};
pub use gdal::to_gdal_color_table;
pub use legend::{format_grouped, html_legend};
pub use preview::{load_colormap_dir, render_preview_page, NamedColormap};
pub use windy::from_windy_json;
