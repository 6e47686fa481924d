//! Numeric primitives shared by the inspector and the importer.
//!
//! Device pixels are the canonical unit for rendered geometry; every other
//! unit system is derived from them through [`FigureMetrics`].

use std::fmt;
use std::str::FromStr;

use crate::errors::{ImportError, InspectError};

/// Typographic points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Accept only finite, strictly positive values.
pub fn positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Unit system a bounding box is reported in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// Device pixels of the realized rendering pass
    #[default]
    Pixels,
    /// Inches (pixels / dpi)
    Physical,
    /// Typographic points (72 per inch)
    Points,
    /// Fraction of the canvas width and height
    Fraction,
}

impl Units {
    pub const ALL: [Units; 4] = [Units::Pixels, Units::Physical, Units::Points, Units::Fraction];

    pub fn as_str(self) -> &'static str {
        match self {
            Units::Pixels => "pixels",
            Units::Physical => "physical",
            Units::Points => "points",
            Units::Fraction => "fraction",
        }
    }

    /// Whether values in this unit system display as rounded integers
    pub fn is_integral(self) -> bool {
        matches!(self, Units::Pixels | Units::Points)
    }
}

impl FromStr for Units {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pixels" => Ok(Units::Pixels),
            "physical" | "inches" => Ok(Units::Physical),
            "points" => Ok(Units::Points),
            "fraction" => Ok(Units::Fraction),
            other => Err(InspectError::InvalidUnits {
                units: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned box as origin plus extent, bottom-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Bounds { x0, y0, width, height }
    }

    pub fn x1(&self) -> f64 {
        self.x0 + self.width
    }

    pub fn y1(&self) -> f64 {
        self.y0 + self.height
    }

    /// Apply `f` to every component.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Bounds {
        Bounds {
            x0: f(self.x0),
            y0: f(self.y0),
            width: f(self.width),
            height: f(self.height),
        }
    }

    /// Divide horizontal components by `sx` and vertical ones by `sy`.
    pub fn per_axis(self, sx: f64, sy: f64) -> Bounds {
        Bounds {
            x0: self.x0 / sx,
            y0: self.y0 / sy,
            width: self.width / sx,
            height: self.height / sy,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.width, self.height)
    }
}

impl From<(f64, f64, f64, f64)> for Bounds {
    fn from((x0, y0, width, height): (f64, f64, f64, f64)) -> Self {
        Bounds { x0, y0, width, height }
    }
}

/// Resolution and physical size of a canvas.
///
/// Converts between device pixels and the other [`Units`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureMetrics {
    /// Pixels per inch
    pub dpi: f64,
    pub width_in: f64,
    pub height_in: f64,
}

impl Default for FigureMetrics {
    fn default() -> Self {
        FigureMetrics {
            dpi: 100.0,
            width_in: 6.4,
            height_in: 4.8,
        }
    }
}

impl FigureMetrics {
    /// Create metrics with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(width_in: f64, height_in: f64, dpi: f64) -> Result<Self, NumericError> {
        Ok(FigureMetrics {
            dpi: positive(dpi)?,
            width_in: positive(width_in)?,
            height_in: positive(height_in)?,
        })
    }

    pub fn width_px(&self) -> f64 {
        self.width_in * self.dpi
    }

    pub fn height_px(&self) -> f64 {
        self.height_in * self.dpi
    }

    /// Convert a layout box in inches to device pixels.
    pub fn realize(&self, inches: Bounds) -> Bounds {
        inches.map(|v| v * self.dpi)
    }

    /// Express a device-pixel box in `units`.
    pub fn convert(&self, px: Bounds, units: Units) -> Bounds {
        match units {
            Units::Pixels => px,
            Units::Physical => px.map(|v| v / self.dpi),
            Units::Points => px.map(|v| POINTS_PER_INCH * v / self.dpi),
            Units::Fraction => px.per_axis(self.width_px(), self.height_px()),
        }
    }
}

/// Width and height in output units
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Parsed `viewBox` attribute: four integers in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewBox {
    pub min_x: i64,
    pub min_y: i64,
    pub width: i64,
    pub height: i64,
}

impl ViewBox {
    /// Native width, `viewBox[2] - viewBox[0]`
    pub fn native_width(&self) -> f64 {
        (self.width - self.min_x) as f64
    }

    /// Native height, `viewBox[3] - viewBox[1]`
    pub fn native_height(&self) -> f64 {
        (self.height - self.min_y) as f64
    }

    pub fn as_array(&self) -> [i64; 4] {
        [self.min_x, self.min_y, self.width, self.height]
    }
}

impl FromStr for ViewBox {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ImportError::InvalidViewBox { value: s.to_string() };
        let values = s
            .split_whitespace()
            .map(|tok| tok.parse::<i64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            &[min_x, min_y, width, height] => Ok(ViewBox { min_x, min_y, width, height }),
            _ => Err(invalid()),
        }
    }
}

/// Format like C's `%.{precision}g`: `precision` significant digits, trailing
/// zeros dropped, scientific notation for very small or large magnitudes.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let precision = precision.max(1);
    // Rounding to `precision` digits can bump the exponent (9.996 -> 1.00e1),
    // so the exponent is read back from the rounded scientific form.
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Fixed-point with at most `places` decimals and no trailing zeros.
pub fn format_decimal(value: f64, places: usize) -> String {
    let s = format!("{:.*}", places, value);
    match trim_fraction(&s) {
        "-0" => "0".to_string(),
        t => t.to_string(),
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_bad_values() {
        assert_eq!(positive(f64::NAN), Err(NumericError::NaN));
        assert_eq!(positive(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(positive(0.0), Err(NumericError::Zero));
        assert_eq!(positive(-3.0), Err(NumericError::Negative));
        assert_eq!(positive(2.5), Ok(2.5));
    }

    #[test]
    fn figure_metrics_try_new_validates_every_field() {
        assert!(FigureMetrics::try_new(6.4, 4.8, 100.0).is_ok());
        assert_eq!(FigureMetrics::try_new(6.4, 4.8, 0.0), Err(NumericError::Zero));
        assert_eq!(FigureMetrics::try_new(-1.0, 4.8, 72.0), Err(NumericError::Negative));
        assert_eq!(FigureMetrics::try_new(6.4, f64::NAN, 72.0), Err(NumericError::NaN));
    }

    #[test]
    fn units_parse_known_names() {
        assert_eq!("pixels".parse::<Units>(), Ok(Units::Pixels));
        assert_eq!("physical".parse::<Units>(), Ok(Units::Physical));
        assert_eq!("inches".parse::<Units>(), Ok(Units::Physical));
        assert_eq!("points".parse::<Units>(), Ok(Units::Points));
        assert_eq!("fraction".parse::<Units>(), Ok(Units::Fraction));
    }

    #[test]
    fn units_reject_unknown_names() {
        for bad in ["", "px", "Pixels", "cm", "furlongs"] {
            assert_eq!(
                bad.parse::<Units>(),
                Err(InspectError::InvalidUnits { units: bad.to_string() })
            );
        }
    }

    #[test]
    fn convert_pixels_to_physical() {
        let m = FigureMetrics::try_new(6.4, 4.8, 100.0).unwrap();
        let b = m.convert(Bounds::new(10.0, 20.0, 100.0, 50.0), Units::Physical);
        assert_eq!(b.as_tuple(), (0.1, 0.2, 1.0, 0.5));
    }

    #[test]
    fn convert_pixels_to_points() {
        let m = FigureMetrics::try_new(6.4, 4.8, 144.0).unwrap();
        let b = m.convert(Bounds::new(144.0, 72.0, 288.0, 2.0), Units::Points);
        assert_eq!(b.as_tuple(), (72.0, 36.0, 144.0, 1.0));
    }

    #[test]
    fn convert_pixels_to_fraction() {
        // 4in x 2in at 50 dpi -> 200 x 100 px
        let m = FigureMetrics::try_new(4.0, 2.0, 50.0).unwrap();
        let b = m.convert(Bounds::new(50.0, 25.0, 100.0, 50.0), Units::Fraction);
        assert_eq!(b.as_tuple(), (0.25, 0.25, 0.5, 0.5));
    }

    #[test]
    fn realize_scales_inches_by_dpi() {
        let m = FigureMetrics::try_new(4.0, 3.0, 200.0).unwrap();
        let b = m.realize(Bounds::new(0.5, 1.0, 2.0, 0.25));
        assert_eq!(b.as_tuple(), (100.0, 200.0, 400.0, 50.0));
    }

    #[test]
    fn view_box_parses_four_integers() {
        let vb: ViewBox = "0 0 24 10".parse().unwrap();
        assert_eq!(vb.as_array(), [0, 0, 24, 10]);
        assert_eq!(vb.native_width(), 24.0);
        assert_eq!(vb.native_height(), 10.0);
    }

    #[test]
    fn view_box_native_size_subtracts_origin() {
        let vb: ViewBox = "2 4 12 14".parse().unwrap();
        assert_eq!(vb.native_width(), 10.0);
        assert_eq!(vb.native_height(), 10.0);
    }

    #[test]
    fn view_box_rejects_non_integers() {
        assert!(matches!(
            "0 0 10.5 10".parse::<ViewBox>(),
            Err(ImportError::InvalidViewBox { .. })
        ));
        assert!(matches!(
            "0 0 10".parse::<ViewBox>(),
            Err(ImportError::InvalidViewBox { .. })
        ));
        assert!(matches!(
            "a b c d".parse::<ViewBox>(),
            Err(ImportError::InvalidViewBox { .. })
        ));
    }

    #[test]
    fn format_general_matches_percent_g() {
        assert_eq!(format_general(0.1, 3), "0.1");
        assert_eq!(format_general(1.0, 3), "1");
        assert_eq!(format_general(0.5, 3), "0.5");
        assert_eq!(format_general(3.14159, 3), "3.14");
        assert_eq!(format_general(123.456, 3), "123");
        assert_eq!(format_general(1234.5, 3), "1.23e+03");
        assert_eq!(format_general(9.996, 3), "10");
        assert_eq!(format_general(0.0001234, 3), "0.000123");
        assert_eq!(format_general(0.00001234, 3), "1.23e-05");
        assert_eq!(format_general(-2.5, 3), "-2.5");
        assert_eq!(format_general(0.0, 3), "0");
    }

    #[test]
    fn format_decimal_trims() {
        assert_eq!(format_decimal(12.0, 3), "12");
        assert_eq!(format_decimal(12.5, 3), "12.5");
        assert_eq!(format_decimal(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_decimal(-0.0001, 3), "0");
    }
}
