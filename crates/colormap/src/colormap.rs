//! The colormap text format.
//!
//! ```text
//! # Two meter temperature, based on the ECMWF chart palette.
//! # units: °C
//!
//! nv,0,0,0,0
//! -30,270,60,40
//! 0,120,50,50
//! 30,0,80,45,200
//! ```
//!
//! Blank lines are ignored. The first `# units: <label>` line sets the units;
//! other comment lines seen before the first data line form the doc comment.
//! Data lines are `value,hue,saturation,lightness[,alpha]` where `value` is a
//! decimal number or `nv` for no-data, and alpha defaults to 255.

use crate::entry::{ColorEntry, ColorValue, EntryRangeError, NO_DATA_LITERAL};
use crate::error::{ColormapError, FormatError};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const UNITS_DIRECTIVE: &str = "# units: ";

/// An ordered value -> color mapping with a physical unit.
///
/// Entry order is preserved exactly as parsed. Downstream colorizers derive
/// interpolation bands from it, so it is never re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    doc_comment: Option<String>,
    units: String,
    entries: Vec<ColorEntry>,
}

impl Colormap {
    /// Build a colormap from parts. `units` must not be blank.
    pub fn new(
        doc_comment: Option<String>,
        units: impl Into<String>,
        entries: Vec<ColorEntry>,
    ) -> Result<Self, FormatError> {
        let units = units.into().trim().to_string();
        if units.is_empty() {
            return Err(FormatError::MissingUnits);
        }
        let doc_comment = doc_comment.and_then(|d| normalize_doc(d.lines()));
        Ok(Self {
            doc_comment,
            units,
            entries,
        })
    }

    /// Parse colormap text. Fails on the first malformed line.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut units: Option<String> = None;
        let mut doc_lines: Vec<&str> = Vec::new();
        let mut entries = Vec::new();
        let mut in_header = true;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(comment) = line.strip_prefix('#') {
                if units.is_none() {
                    // Only the exact `# units: <label>` form; `# units:m` or a
                    // bare `# units:` is an ordinary comment.
                    if let Some(label) = line.strip_prefix(UNITS_DIRECTIVE) {
                        units = Some(label.trim().to_string());
                        continue;
                    }
                }
                if in_header {
                    doc_lines.push(comment.trim());
                }
                continue;
            }

            in_header = false;
            entries.push(parse_entry(line, line_no)?);
        }

        let units = units.ok_or(FormatError::MissingUnits)?;
        let doc_comment = normalize_doc(doc_lines.into_iter());

        tracing::debug!(units = %units, entries = entries.len(), "Parsed colormap");

        Ok(Self {
            doc_comment,
            units,
            entries,
        })
    }

    /// Read and parse a colormap file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ColormapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ColormapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ColormapError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize back to the text format.
    ///
    /// Fully transparent entries are written with hue, saturation and
    /// lightness zeroed, so their original color does not survive a round
    /// trip. Opaque entries omit the alpha field.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(UNITS_DIRECTIVE);
        out.push_str(&self.units);
        out.push('\n');

        if let Some(doc) = &self.doc_comment {
            for line in doc.lines() {
                if line.is_empty() {
                    out.push_str("#\n");
                } else {
                    out.push_str("# ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out.push('\n');

        for entry in &self.entries {
            out.push_str(&serialize_entry(entry));
            out.push('\n');
        }
        out
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with a real data value, in colormap order.
    pub fn data_entries(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.iter().filter(|e| !e.is_no_data())
    }

    /// The first no-data entry, if any.
    pub fn no_data_entry(&self) -> Option<&ColorEntry> {
        self.entries.iter().find(|e| e.is_no_data())
    }
}

impl FromStr for Colormap {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Join doc lines and drop leading/trailing blank lines. Empty means no doc.
fn normalize_doc<'a>(lines: impl Iterator<Item = &'a str>) -> Option<String> {
    let lines: Vec<&str> = lines.map(str::trim).collect();
    let start = lines.iter().position(|l| !l.is_empty())?;
    let end = lines.iter().rposition(|l| !l.is_empty())?;
    Some(lines[start..=end].join("\n"))
}

fn serialize_entry(entry: &ColorEntry) -> String {
    match entry.alpha() {
        0 => format!("{},0,0,0,0", entry.value()),
        255 => format!(
            "{},{},{},{}",
            entry.value(),
            entry.hue(),
            entry.saturation(),
            entry.lightness()
        ),
        alpha => format!(
            "{},{},{},{},{}",
            entry.value(),
            entry.hue(),
            entry.saturation(),
            entry.lightness(),
            alpha
        ),
    }
}

fn parse_entry(line: &str, line_no: usize) -> Result<ColorEntry, FormatError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 4 || fields.len() > 5 {
        return Err(FormatError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let value = parse_value(fields[0], line_no)?;
    let hue = parse_int(fields[1], "hue", 360, line_no)?;
    let saturation = parse_int(fields[2], "saturation", 100, line_no)?;
    let lightness = parse_int(fields[3], "lightness", 100, line_no)?;
    let alpha = match fields.get(4) {
        Some(text) => parse_int(text, "alpha", 255, line_no)?,
        None => 255,
    };

    ColorEntry::new(
        value,
        hue as u16,
        saturation as u8,
        lightness as u8,
        alpha as u8,
    )
    .map_err(|e| match e {
        EntryRangeError::NonFiniteValue => FormatError::InvalidNumber {
            line: line_no,
            field: "value",
            text: fields[0].to_string(),
        },
        EntryRangeError::Hue(v) => out_of_range(line_no, "hue", i64::from(v), 360),
        EntryRangeError::Saturation(v) => out_of_range(line_no, "saturation", i64::from(v), 100),
        EntryRangeError::Lightness(v) => out_of_range(line_no, "lightness", i64::from(v), 100),
    })
}

fn parse_value(text: &str, line_no: usize) -> Result<ColorValue, FormatError> {
    if text == NO_DATA_LITERAL {
        return Ok(ColorValue::NoData);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(ColorValue::Value(v)),
        _ => Err(FormatError::InvalidNumber {
            line: line_no,
            field: "value",
            text: text.to_string(),
        }),
    }
}

fn parse_int(text: &str, field: &'static str, max: i64, line_no: usize) -> Result<i64, FormatError> {
    let value: i64 = text.parse().map_err(|_| FormatError::InvalidNumber {
        line: line_no,
        field,
        text: text.to_string(),
    })?;
    if !(0..=max).contains(&value) {
        return Err(out_of_range(line_no, field, value, max));
    }
    Ok(value)
}

fn out_of_range(line: usize, field: &'static str, value: i64, max: i64) -> FormatError {
    FormatError::OutOfRange {
        line,
        field,
        value,
        min: 0,
        max,
    }
}
