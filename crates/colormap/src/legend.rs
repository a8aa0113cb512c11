//! HTML legend rendering.

use crate::entry::ColorEntry;
use crate::Colormap;

const ENTRY_STYLE: &str =
    "height: 1.3em; display: inline-flex; align-items: center; gap: 0.2em; margin: 4px 2px;";
const SWATCH_STYLE: &str = "display: inline-block; width: 7px; height: 100%; border: 1px solid #282828;";

/// Render one inline legend block per data entry, in colormap order.
///
/// The no-data entry never appears in the legend.
pub fn html_legend(colormap: &Colormap) -> String {
    colormap.data_entries().map(legend_entry).collect()
}

fn legend_entry(entry: &ColorEntry) -> String {
    let rgb = entry.rgb();
    let label = entry
        .value()
        .as_f64()
        .map(format_grouped)
        .unwrap_or_default();

    format!(
        "<span class=\"legend-entry\" style=\"{}\"><span style=\"background-color: rgba({},{},{},{}); {}\"></span><span>{}</span></span>\n",
        ENTRY_STYLE,
        rgb.r,
        rgb.g,
        rgb.b,
        format_alpha(entry.alpha()),
        SWATCH_STYLE,
        label
    )
}

/// CSS alpha in 0..=1 with at most three decimals.
fn format_alpha(alpha: u8) -> String {
    let s = format!("{:.3}", f64::from(alpha) / 255.0);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Format a number with comma-grouped thousands and no trailing zero
/// fraction digits: `1000.0` -> `1,000`, `-12345.5` -> `-12,345.5`.
pub fn format_grouped(value: f64) -> String {
    let text = format!("{}", value);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (digits, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if grouped == "0" && frac_part.is_empty() {
        ""
    } else {
        sign
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(-0.0), "0");
        assert_eq!(format_grouped(5.0), "5");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(-12345.5), "-12,345.5");
        assert_eq!(format_grouped(0.25), "0.25");
        assert_eq!(format_grouped(100000.125), "100,000.125");
    }

    #[test]
    fn test_format_alpha() {
        assert_eq!(format_alpha(255), "1");
        assert_eq!(format_alpha(0), "0");
        assert_eq!(format_alpha(128), "0.502");
    }

    #[test]
    fn test_legend_entry_markup() {
        let entry =
            ColorEntry::new(crate::ColorValue::Value(1000.0), 0, 100, 50, 255).unwrap();
        let html = legend_entry(&entry);
        assert!(html.contains("rgba(255,0,0,1)"));
        assert!(html.contains("<span>1,000</span>"));
        assert!(html.ends_with("</span>\n"));
    }
}
