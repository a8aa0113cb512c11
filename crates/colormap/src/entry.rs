//! A single colormap entry.

use crate::color::{hsl_to_rgb, Hsl, Rgb};
use std::fmt;

/// Literal used for the no-data sentinel in every text format.
pub const NO_DATA_LITERAL: &str = "nv";

/// The data value an entry is anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    /// Matches pixels without a valid measurement.
    NoData,
    /// A finite data value.
    Value(f64),
}

impl ColorValue {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ColorValue::NoData)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColorValue::NoData => None,
            ColorValue::Value(v) => Some(*v),
        }
    }
}

/// Writes `nv` or the shortest decimal that parses back to the same value.
impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::NoData => f.write_str(NO_DATA_LITERAL),
            ColorValue::Value(v) => write!(f, "{}", v),
        }
    }
}

/// One value -> color stop.
///
/// Fields are validated on construction and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEntry {
    value: ColorValue,
    hue: u16,
    saturation: u8,
    lightness: u8,
    alpha: u8,
}

/// Reason an entry was rejected by [`ColorEntry::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRangeError {
    NonFiniteValue,
    Hue(u16),
    Saturation(u8),
    Lightness(u8),
}

impl ColorEntry {
    pub fn new(
        value: ColorValue,
        hue: u16,
        saturation: u8,
        lightness: u8,
        alpha: u8,
    ) -> Result<Self, EntryRangeError> {
        if let ColorValue::Value(v) = value {
            if !v.is_finite() {
                return Err(EntryRangeError::NonFiniteValue);
            }
        }
        if hue > 360 {
            return Err(EntryRangeError::Hue(hue));
        }
        if saturation > 100 {
            return Err(EntryRangeError::Saturation(saturation));
        }
        if lightness > 100 {
            return Err(EntryRangeError::Lightness(lightness));
        }
        Ok(Self {
            value,
            hue,
            saturation,
            lightness,
            alpha,
        })
    }

    pub fn value(&self) -> ColorValue {
        self.value
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn is_no_data(&self) -> bool {
        self.value.is_no_data()
    }

    pub fn hsl(&self) -> Hsl {
        Hsl::new(self.hue, self.saturation, self.lightness)
    }

    pub fn rgb(&self) -> Rgb {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}
