//! Measurements and unit conversion
//!
//! A layout session declares its canvas twice: once in pixels and once in a
//! physical unit (inches or centimeters). The ratio between the two gives a
//! `Conversion` that turns any physical measurement into pixels for the rest
//! of the engine.

use thiserror::Error;

/// Errors from measurement parsing and conversion setup
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Text does not match `number [unit]` exactly
    #[error("malformed measurement '{text}' (expected e.g. '10px', '0.5 in', '2cm')")]
    Malformed { text: String },

    /// A conversion needs one pixel size and one physical size
    #[error("conversion expects a pixel size and a physical size, got '{pixel}' and '{physical}'")]
    InvalidConversionPair { pixel: String, physical: String },

    /// Horizontal and vertical size pairs disagree about the pixel density
    #[error("pixel/physical ratio differs between axes: {horizontal} and {vertical} px per inch")]
    InconsistentRatio { horizontal: f64, vertical: f64 },
}

/// Unit of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Pixel,
    Centimeter,
    Inch,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
        }
    }

    /// Physical units are the ones a `Conversion` is derived against
    pub fn is_physical(&self) -> bool {
        !matches!(self, Unit::Pixel)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable magnitude/unit pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A zero-pixel measurement, the offset of a pure reference term
    pub fn zero() -> Self {
        Self::new(0.0, Unit::Pixel)
    }

    pub fn pixels(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Parse a measurement literal: a decimal number, an optional single space,
/// and an optional unit suffix. A bare number defaults to pixels.
///
/// Surrounding whitespace is trimmed (scene files indent these strings);
/// after trimming, the whole string must match, never just a prefix.
pub fn parse_measurement(text: &str) -> Result<Measurement, MeasureError> {
    let malformed = || MeasureError::Malformed {
        text: text.to_string(),
    };

    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();

    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return Err(malformed());
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return Err(malformed());
        }
    }

    let value: f64 = trimmed[..i].parse().map_err(|_| malformed())?;

    let mut rest = &trimmed[i..];
    if let Some(stripped) = rest.strip_prefix(' ') {
        // A lone trailing space without a unit does not match
        if stripped.is_empty() {
            return Err(malformed());
        }
        rest = stripped;
    }

    let unit = match rest {
        "" => Unit::Pixel,
        "px" => Unit::Pixel,
        "cm" => Unit::Centimeter,
        "in" => Unit::Inch,
        _ => return Err(malformed()),
    };

    Ok(Measurement::new(value, unit))
}

/// Exchange factor turning one physical unit into another (1 in = 2.54 cm)
fn exchange(from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Inch, Unit::Centimeter) => 2.54,
        (Unit::Centimeter, Unit::Inch) => 1.0 / 2.54,
        _ => 1.0,
    }
}

/// Pixels-per-physical-unit ratio for one layout session
///
/// Built once at engine construction from the declared canvas sizes and
/// shared by every measurement conversion afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Conversion {
    px_per_unit: f64,
    physical_unit: Unit,
}

impl Conversion {
    /// Derive the ratio from one pixel/physical size pair
    pub fn new(pixel: Measurement, physical: Measurement) -> Result<Self, MeasureError> {
        if pixel.unit != Unit::Pixel || !physical.unit.is_physical() {
            return Err(MeasureError::InvalidConversionPair {
                pixel: pixel.to_string(),
                physical: physical.to_string(),
            });
        }
        Ok(Self {
            px_per_unit: pixel.value / physical.value,
            physical_unit: physical.unit,
        })
    }

    /// Derive the ratio from both axis pairs, failing if they disagree
    pub fn from_axis_pairs(
        pixel: (Measurement, Measurement),
        physical: (Measurement, Measurement),
    ) -> Result<Self, MeasureError> {
        let horizontal = Conversion::new(pixel.0, physical.0)?;
        let vertical = Conversion::new(pixel.1, physical.1)?;
        if !horizontal.equivalent(&vertical) {
            return Err(MeasureError::InconsistentRatio {
                horizontal: horizontal.px_per_inch(),
                vertical: vertical.px_per_inch(),
            });
        }
        Ok(horizontal)
    }

    /// Two conversions are equivalent when an inch spans the same number of
    /// pixels through either, within floating-point tolerance
    pub fn equivalent(&self, other: &Conversion) -> bool {
        let a = self.px_per_inch();
        let b = other.px_per_inch();
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn px_per_inch(&self) -> f64 {
        self.px_per_unit * exchange(Unit::Inch, self.physical_unit)
    }

    /// Convert a measurement to whole pixels, truncating toward zero
    ///
    /// Truncation (not rounding) is deliberate: every conversion in the
    /// engine uses this single rule so results are reproducible.
    pub fn to_px(&self, m: &Measurement) -> i64 {
        match m.unit {
            Unit::Pixel => m.value.trunc() as i64,
            unit => (m.value * exchange(unit, self.physical_unit) * self.px_per_unit).trunc() as i64,
        }
    }

    /// The physical unit the ratio was derived against
    pub fn physical_unit(&self) -> Unit {
        self.physical_unit
    }

    /// Pixels spanned by one of the conversion's physical units
    pub fn ratio(&self) -> f64 {
        self.px_per_unit
    }
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1 {} is {} pixels", self.physical_unit, self.px_per_unit)
    }
}
