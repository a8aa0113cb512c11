//! Export to the GDAL `color-relief` color table format.
//!
//! One `value,R,G,B,A` line per entry, with `nv` passed through for the
//! no-data entry. The file is handed to an external colorizer, typically
//! `gdaldem color-relief -alpha -nearest_color_entry`.

use crate::Colormap;

/// Render the colormap as a GDAL color table, preserving entry order.
pub fn to_gdal_color_table(colormap: &Colormap) -> String {
    let mut out = String::with_capacity(colormap.len() * 20);
    for entry in colormap.entries() {
        let rgb = entry.rgb();
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            entry.value(),
            rgb.r,
            rgb.g,
            rgb.b,
            entry.alpha()
        ));
    }
    out
}
