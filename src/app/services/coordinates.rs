//! Geographic coordinate conversion
//!
//! Converts the feed's degrees/decimal-minutes strings (with a trailing
//! hemisphere letter) into decimal degrees. The conversion follows the
//! report's own conventions: minutes are rounded to two decimal places
//! before the division, and the hemisphere sign factor is exposed but not
//! applied to the result.

use crate::{Error, Result};

/// Hemisphere letter trailing a DMS string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a hemisphere token (`N`, `S`, `E`, `W`)
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Sign factor for the hemisphere.
    ///
    /// Note that the decimal-degree conversion deliberately does not apply
    /// this factor; callers needing signed values must do so themselves.
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }

    /// Zero-padded degree width: longitudes pad to 3 digits, latitudes to 2
    pub fn degree_width(&self) -> usize {
        match self {
            Hemisphere::East | Hemisphere::West => 3,
            Hemisphere::North | Hemisphere::South => 2,
        }
    }
}

/// A parsed degrees/decimal-minutes coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct DmsCoordinate {
    /// Whole degrees
    pub degrees: u32,

    /// Decimal minutes, seconds already folded in and rounded to 2 places
    pub minutes: f64,

    /// Hemisphere letter from the last token
    pub hemisphere: Hemisphere,
}

impl DmsCoordinate {
    /// Parse a DMS string such as `48*33.82'N` or `016°05.504'E`.
    ///
    /// Degree/minute/second punctuation variants are stripped to whitespace
    /// and the last remaining token is the hemisphere letter. Minutes are
    /// computed as `minutes + seconds/60`, rounded to 2 decimal places.
    pub fn parse(dms: &str) -> Result<Self> {
        let cleaned: String = dms
            .chars()
            .map(|c| match c {
                '°' | '*' | '\'' | '"' => ' ',
                other => other,
            })
            .collect();

        let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let hemisphere_token = tokens
            .pop()
            .ok_or_else(|| Error::format("coordinate", "empty DMS string"))?;
        let hemisphere = Hemisphere::from_token(hemisphere_token).ok_or_else(|| {
            Error::format(
                "coordinate",
                format!("unknown hemisphere letter: '{}'", hemisphere_token),
            )
        })?;

        let degrees: u32 = tokens
            .first()
            .ok_or_else(|| Error::format("coordinate", "missing degree token"))?
            .parse()
            .map_err(|_| {
                Error::format(
                    "coordinate",
                    format!("non-numeric degree token in '{}'", dms),
                )
            })?;

        let minutes_whole: f64 = match tokens.get(1) {
            Some(token) => token.parse().map_err(|_| {
                Error::format(
                    "coordinate",
                    format!("non-numeric minute token in '{}'", dms),
                )
            })?,
            None => 0.0,
        };

        let seconds_whole: f64 = match tokens.get(2) {
            Some(token) => token.parse().map_err(|_| {
                Error::format(
                    "coordinate",
                    format!("non-numeric second token in '{}'", dms),
                )
            })?,
            None => 0.0,
        };

        let minutes = round_minutes(minutes_whole + seconds_whole / 60.0);

        Ok(Self {
            degrees,
            minutes,
            hemisphere,
        })
    }

    /// Degrees zero-padded to the hemisphere's width, e.g. `048` for `E`
    pub fn padded_degrees(&self) -> String {
        format!(
            "{:0width$}",
            self.degrees,
            width = self.hemisphere.degree_width()
        )
    }

    /// Unsigned decimal degrees, formatted to exactly 4 decimal places.
    ///
    /// Hemisphere sign is not applied here.
    pub fn to_decimal_degrees(&self) -> f64 {
        let value = self.degrees as f64 + self.minutes / 60.0;
        let formatted = format!("{:.4}", value);
        formatted.parse().unwrap_or(value)
    }
}

/// Convert a DMS string with trailing hemisphere letter to unsigned
/// decimal degrees
pub fn to_decimal_degrees(dms: &str) -> Result<f64> {
    Ok(DmsCoordinate::parse(dms)?.to_decimal_degrees())
}

/// Convert a coordinate as captured from the minmax report, where the
/// hemisphere letter leads the value (`N 48*33.82`), into decimal degrees
pub fn report_coordinate_to_decimal(raw: &str) -> Result<f64> {
    let mut parts = raw.split_whitespace();
    let hemisphere = parts
        .next()
        .ok_or_else(|| Error::format("coordinate", "empty report coordinate"))?;
    let value = parts.next().ok_or_else(|| {
        Error::format(
            "coordinate",
            format!("report coordinate missing value: '{}'", raw),
        )
    })?;

    to_decimal_degrees(&format!("{}'{}", value, hemisphere))
}

/// Round decimal minutes to the feed's own 2-decimal-minute convention
fn round_minutes(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
