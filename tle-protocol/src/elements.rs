//! Fixed-column extraction of mean orbital elements from a TLE record

use chrono::{Duration, NaiveDate};
use orbit_types::prelude::*;
use std::f64::consts::PI;

/// A fixed-width TLE field, 1-based inclusive columns as in the format definition
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Column {
    pub field: &'static str,
    pub line: u8,
    pub start: usize,
    pub end: usize,
}

impl Column {
    const fn new(field: &'static str, line: u8, start: usize, end: usize) -> Self {
        Self {
            field,
            line,
            start,
            end,
        }
    }

    fn slice<'a>(&self, line: &'a str) -> Result<&'a str, FieldParseError> {
        line.get(self.start - 1..self.end)
            .ok_or(FieldParseError::Truncated { column: *self })
    }
}

pub const CATALOG_NUMBER: Column = Column::new("catalog number", 1, 3, 7);
pub const EPOCH_YEAR: Column = Column::new("epoch year", 1, 19, 20);
pub const EPOCH_DAY: Column = Column::new("epoch day", 1, 21, 32);
pub const INCLINATION: Column = Column::new("inclination", 2, 9, 16);
pub const RIGHT_ASCENSION: Column = Column::new("right ascension", 2, 18, 25);
pub const ECCENTRICITY: Column = Column::new("eccentricity", 2, 27, 33);
pub const ARGUMENT_OF_PERIAPSIS: Column = Column::new("argument of periapsis", 2, 35, 42);
pub const MEAN_ANOMALY: Column = Column::new("mean anomaly", 2, 44, 51);
pub const MEAN_MOTION: Column = Column::new("mean motion", 2, 53, 63);

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum FieldParseError {
    #[error("Line {} is too short for the {} field (columns {}-{})", .column.line, .column.field, .column.start, .column.end)]
    Truncated { column: Column },
    #[error("Invalid {field} '{raw}'")]
    Invalid { field: &'static str, raw: String },
    #[error("The {field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Derive the orbital elements of a record.
///
/// Any unparsable field fails the whole extraction; the caller keeps
/// propagating the record without elements.
pub fn extract_elements(
    tle: &TleRecord,
    pivot: EpochPivot,
) -> Result<OrbitalElements, FieldParseError> {
    let l1 = tle.line1.as_str();
    let l2 = tle.line2.as_str();

    let catalog_number = catalog_number(l1)?;

    let yy = EPOCH_YEAR.slice(l1)?;
    let yy: u32 = yy.trim().parse().map_err(|_| invalid(&EPOCH_YEAR, yy))?;
    let epoch_year = pivot.resolve(yy);
    let epoch_day = float(&EPOCH_DAY, l1)?;
    if !(1.0..days_in_year(epoch_year) + 1.0).contains(&epoch_day) {
        return Err(FieldParseError::OutOfRange {
            field: EPOCH_DAY.field,
            value: epoch_day,
        });
    }
    let epoch = epoch_timestamp(epoch_year, epoch_day)?;

    let inclination = float(&INCLINATION, l2)?;
    let right_ascension = float(&RIGHT_ASCENSION, l2)?;
    let eccentricity = eccentricity(l2)?;
    let argument_of_periapsis = float(&ARGUMENT_OF_PERIAPSIS, l2)?;
    let mean_anomaly = float(&MEAN_ANOMALY, l2)?;
    let mean_motion = float(&MEAN_MOTION, l2)?;
    if mean_motion <= 0.0 {
        return Err(FieldParseError::OutOfRange {
            field: MEAN_MOTION.field,
            value: mean_motion,
        });
    }

    let period = MINUTES_PER_DAY / mean_motion;
    let semi_major_axis = semi_major_axis_km(mean_motion);
    let apogee = semi_major_axis * (1.0 + eccentricity) - EARTH_RADIUS_KM;
    let perigee = semi_major_axis * (1.0 - eccentricity) - EARTH_RADIUS_KM;

    Ok(OrbitalElements {
        catalog_number,
        epoch_year,
        epoch_day,
        epoch,
        inclination,
        right_ascension,
        eccentricity,
        argument_of_periapsis,
        mean_anomaly,
        mean_motion,
        period,
        semi_major_axis,
        apogee,
        perigee,
    })
}

/// Kepler's third law, mean motion in [rev/day]
pub fn semi_major_axis_km(mean_motion: f64) -> f64 {
    let n_rad_s = mean_motion * 2.0 * PI / SECONDS_PER_DAY;
    (MU_EARTH_KM3_S2 / (n_rad_s * n_rad_s)).cbrt()
}

fn catalog_number(l1: &str) -> Result<String, FieldParseError> {
    let raw = CATALOG_NUMBER.slice(l1)?;
    let num = raw.trim();
    // Alpha-5 numbers put a letter in the first column
    if num.is_empty() || !num.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(&CATALOG_NUMBER, raw));
    }
    Ok(num.to_owned())
}

/// Implied leading decimal point
fn eccentricity(l2: &str) -> Result<f64, FieldParseError> {
    let raw = ECCENTRICITY.slice(l2)?;
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(&ECCENTRICITY, raw));
    }
    format!("0.{digits}")
        .parse()
        .map_err(|_| invalid(&ECCENTRICITY, raw))
}

fn float(column: &Column, line: &str) -> Result<f64, FieldParseError> {
    let raw = column.slice(line)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(column, raw)),
    }
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_yo_opt(year, 366).is_some() {
        366.0
    } else {
        365.0
    }
}

fn epoch_timestamp(year: i32, day: f64) -> Result<UtcTimestamp, FieldParseError> {
    let out_of_range = || FieldParseError::OutOfRange {
        field: EPOCH_DAY.field,
        value: day,
    };
    let jan1 = NaiveDate::from_yo_opt(year, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(out_of_range)?;
    let offset_us = ((day - 1.0) * SECONDS_PER_DAY * 1e6).round() as i64;
    Ok((jan1 + Duration::microseconds(offset_us)).and_utc())
}

fn invalid(column: &Column, raw: &str) -> FieldParseError {
    FieldParseError::Invalid {
        field: column.field,
        raw: raw.to_owned(),
    }
}
