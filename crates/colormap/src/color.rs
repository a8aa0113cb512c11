//! HSL <-> RGB conversion.
//!
//! Colormaps store colors as integer HSL, the renderers and GDAL want RGB.
//! Both directions round to the nearest integer and then clamp into the legal
//! range, so floating point overshoot at the boundaries never escapes.

/// An integer HSL color. `hue` in 0..=360, `saturation` and `lightness` in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

fn round_clamp(v: f64, max: f64) -> f64 {
    v.round().clamp(0.0, max)
}

/// Convert integer HSL to RGB.
///
/// Out-of-range inputs are clamped first (hue taken modulo 360), so the
/// function is total.
pub fn hsl_to_rgb(hue: u16, saturation: u8, lightness: u8) -> Rgb {
    let h = f64::from(hue % 360);
    let s = f64::from(saturation.min(100)) / 100.0;
    let l = f64::from(lightness.min(100)) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f64| round_clamp((v + m) * 255.0, 255.0) as u8;
    Rgb {
        r: channel(r1),
        g: channel(g1),
        b: channel(b1),
    }
}

/// Convert RGB to integer HSL. Achromatic colors get hue 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let lightness = round_clamp(l * 100.0, 100.0) as u8;

    let d = max - min;
    if d == 0.0 {
        return Hsl::new(0, 0, lightness);
    }

    let s = d / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };

    Hsl {
        hue: round_clamp(h, 360.0) as u16,
        saturation: round_clamp(s * 100.0, 100.0) as u8,
        lightness,
    }
}
