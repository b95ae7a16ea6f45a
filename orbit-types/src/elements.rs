use crate::prelude::UtcTimestamp;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Mean orbital elements derived from a TLE, plus the quantities computed from them
#[derive(Clone, PartialEq, Debug, Display, Serialize)]
#[display(
    fmt = "{{catalog: {}, epoch: {}, inc: {}, ecc: {}, period: {} min, ...}}",
    "catalog_number",
    "epoch",
    "inclination",
    "eccentricity",
    "period"
)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalElements {
    /// Satellite catalog number, line 1 columns 3-7
    pub catalog_number: String,

    /// Epoch year, resolved to four digits
    pub epoch_year: i32,
    /// Epoch day of year, fractional, 1.0 is Jan 1 00:00 UTC
    pub epoch_day: f64,
    /// Epoch as a UTC timestamp
    pub epoch: UtcTimestamp,

    /// [deg]
    pub inclination: f64,
    /// Right ascension of the ascending node [deg]
    pub right_ascension: f64,
    /// In [0, 1)
    pub eccentricity: f64,
    /// [deg]
    pub argument_of_periapsis: f64,
    /// [deg]
    pub mean_anomaly: f64,
    /// [rev/day], strictly positive
    pub mean_motion: f64,

    /// [min]
    pub period: f64,
    /// Semi-major axis [km]
    #[serde(skip)]
    pub semi_major_axis: f64,
    /// Height above the reference radius [km]
    pub apogee: f64,
    /// Height above the reference radius [km]
    pub perigee: f64,
}

/// Two-digit epoch year pivot.
///
/// Years below the pivot land in the 2000s, the rest in the 1900s.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochPivot(pub u8);

impl EpochPivot {
    /// The NORAD convention: 57..=99 -> 1957..=1999, 00..=56 -> 2000..=2056
    pub const NORAD: EpochPivot = EpochPivot(57);

    pub fn resolve(self, two_digit_year: u32) -> i32 {
        let yy = two_digit_year as i32;
        if yy < i32::from(self.0) {
            2000 + yy
        } else {
            1900 + yy
        }
    }
}

impl Default for EpochPivot {
    fn default() -> Self {
        Self::NORAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norad_pivot() {
        let p = EpochPivot::default();
        assert_eq!(p.resolve(0), 2000);
        assert_eq!(p.resolve(24), 2024);
        assert_eq!(p.resolve(56), 2056);
        assert_eq!(p.resolve(57), 1957);
        assert_eq!(p.resolve(98), 1998);
    }

    #[test]
    fn custom_pivot() {
        let p = EpochPivot(50);
        assert_eq!(p.resolve(49), 2049);
        assert_eq!(p.resolve(50), 1950);
        assert_eq!(p.resolve(56), 1956);
    }
}
