use core::fmt;
use num_complex::Complex64;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::str::FromStr;

/// Lowest level written in a dB field. A zero magnitude maps here instead of
/// `-inf` so the output never carries a non-finite token.
pub const DB_FLOOR: f64 = -300.0;

/// Text written for a non-finite value under [`Degenerate::Zero`].
pub const ZERO_TEXT: &str = "0.0";

/// Number of fractional digits in every numeric output field.
pub const PRECISION: usize = 6;

/// Representation of a complex value as a pair of numbers on a data line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ComplexNumberType {
    #[default]
    ReIm,
    MagAng,
    Db,
}

impl ComplexNumberType {
    /// Complex value from a (first, second) pair read in this representation.
    /// Angles are in degrees.
    pub fn parse(&self, x: f64, y: f64) -> Complex64 {
        match self {
            ComplexNumberType::ReIm => Complex64::new(x, y),
            ComplexNumberType::MagAng => Complex64::from_polar(x, y.to_radians()),
            ComplexNumberType::Db => Complex64::from_polar(mag_from_db(x), y.to_radians()),
        }
    }

    /// Pair of numbers this representation writes for `c`, before formatting.
    pub fn split(&self, c: Complex64) -> (f64, f64) {
        match self {
            ComplexNumberType::ReIm => (c.re, c.im),
            ComplexNumberType::MagAng => mag_ang(c),
            ComplexNumberType::Db => {
                let (mag, ang) = mag_ang(c);
                (db_from_mag(mag), ang)
            }
        }
    }

    /// Formatted output fields for `c`.
    ///
    /// The dB field follows [`Degenerate::DbFloor`]; every other field follows
    /// [`Degenerate::Zero`].
    pub fn format(&self, c: Complex64) -> [String; 2] {
        let (x, y) = self.split(c);
        match self {
            ComplexNumberType::Db => [Degenerate::DbFloor.fixed(x), Degenerate::Zero.fixed(y)],
            _ => [Degenerate::Zero.fixed(x), Degenerate::Zero.fixed(y)],
        }
    }

    // Convert ComplexNumberType to a touchstone option line string
    pub fn to_str(&self) -> &str {
        match self {
            ComplexNumberType::ReIm => "RI",
            ComplexNumberType::MagAng => "MA",
            ComplexNumberType::Db => "DB",
        }
    }
}

impl FromStr for ComplexNumberType {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ri" => Ok(ComplexNumberType::ReIm),
            "ma" => Ok(ComplexNumberType::MagAng),
            "db" => Ok(ComplexNumberType::Db),
            _ => bail!("ComplexNumberType not recognized"),
        }
    }
}

impl fmt::Display for ComplexNumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// How a field with no finite value is written.
///
/// The two policies belong to different output paths and are kept apart:
/// rectangular and polar fields fall back to zero, dB fields fall back to
/// [`DB_FLOOR`] because consumers read an extreme-negative level as "no signal".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Degenerate {
    Zero,
    DbFloor,
}

impl Degenerate {
    /// Fixed-point text with [`PRECISION`] fractional digits.
    pub fn fixed(&self, x: f64) -> String {
        if x.is_finite() {
            return fixed(x);
        }
        match self {
            Degenerate::Zero => ZERO_TEXT.to_string(),
            Degenerate::DbFloor => fixed(DB_FLOOR),
        }
    }
}

fn fixed(x: f64) -> String {
    let text = format!("{:.*}", PRECISION, x);
    // no negative zero, including values that round to it
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

pub fn mag_from_db(db: f64) -> f64 {
    10_f64.powf(db / 20.0)
}

/// Level in dB for a linear magnitude. Anything not strictly positive
/// (including NaN) maps to [`DB_FLOOR`].
pub fn db_from_mag(mag: f64) -> f64 {
    if mag > 0.0 {
        20.0 * mag.log10()
    } else {
        DB_FLOOR
    }
}

/// Magnitude and angle in degrees.
pub fn mag_ang(c: Complex64) -> (f64, f64) {
    (c.norm(), c.arg().to_degrees())
}
