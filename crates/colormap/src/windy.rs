//! Import of Windy color scales.
//!
//! Windy publishes its scales as a JSON array of `[value, [r, g, b, a]]`
//! pairs. Colors are converted to HSL so the result round-trips through the
//! colormap text format.

use crate::color::rgb_to_hsl;
use crate::entry::{ColorEntry, ColorValue};
use crate::error::WindyImportError;
use crate::Colormap;

/// Doc comment attached to every imported scale.
pub const WINDY_DOC_COMMENT: &str = "Based on a color scale from windy.com";

/// Convert a Windy color scale JSON document into a colormap.
pub fn from_windy_json(json: &str, units: &str) -> Result<Colormap, WindyImportError> {
    let raw: Vec<(f64, Vec<i64>)> = serde_json::from_str(json)?;

    let mut entries = Vec::with_capacity(raw.len());
    for (index, (value, channels)) in raw.into_iter().enumerate() {
        if !value.is_finite() {
            return Err(WindyImportError::NonFiniteValue { index, value });
        }
        if channels.len() != 4 {
            return Err(WindyImportError::ChannelCount {
                index,
                found: channels.len(),
            });
        }

        let mut rgba = [0u8; 4];
        for (slot, &channel) in rgba.iter_mut().zip(&channels) {
            *slot = u8::try_from(channel)
                .map_err(|_| WindyImportError::ChannelRange { index, value: channel })?;
        }

        let hsl = rgb_to_hsl(rgba[0], rgba[1], rgba[2]);
        let entry = ColorEntry::new(
            ColorValue::Value(value),
            hsl.hue,
            hsl.saturation,
            hsl.lightness,
            rgba[3],
        )
        .map_err(|_| WindyImportError::NonFiniteValue { index, value })?;
        entries.push(entry);
    }

    Colormap::new(Some(WINDY_DOC_COMMENT.to_string()), units, entries)
        .map_err(|_| WindyImportError::EmptyUnits)
}
