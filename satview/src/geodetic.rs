//! ECI to geodetic conversion
//!
//! The engine-facing side ([`greenwich_sidereal_time`], [`eci_to_geodetic`]) works
//! in radians and kilometers. [`GeodeticPosition`] is the boundary form: degrees
//! and meters.

use na::{Rotation3, Vector3};
use nav_types::{ECEF, WGS84};
use orbit_types::prelude::UtcTimestamp;
use std::f64::consts::TAU;

use crate::units::{Angle, Length};

const JULIAN_DATE_UNIX_EPOCH: f64 = 2_440_587.5;
const JULIAN_DATE_J2000: f64 = 2_451_545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Raw engine output
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GeodeticCoordinates {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub height_km: f64,
}

/// Geodetic position in output units
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GeodeticPosition {
    /// [-90, 90]
    pub latitude: Angle,
    /// (-180, 180]
    pub longitude: Angle,
    /// Above the WGS-84 ellipsoid
    pub altitude: Length,
}

impl From<GeodeticCoordinates> for GeodeticPosition {
    fn from(c: GeodeticCoordinates) -> Self {
        GeodeticPosition {
            latitude: Angle::from_radians(c.latitude_rad),
            longitude: Angle::from_radians(c.longitude_rad),
            altitude: Length::from_kilometers(c.height_km),
        }
    }
}

pub fn julian_date(at: UtcTimestamp) -> f64 {
    at.timestamp_millis() as f64 / MILLIS_PER_DAY + JULIAN_DATE_UNIX_EPOCH
}

/// Greenwich Mean Sidereal Time, IAU-82 model
pub fn greenwich_sidereal_time(at: UtcTimestamp) -> Angle {
    let tut1 = (julian_date(at) - JULIAN_DATE_J2000) / DAYS_PER_JULIAN_CENTURY;
    // Seconds of sidereal time
    let gmst_s = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876_600.0 * 3600.0 + 8_640_184.812866) * tut1
        + 67_310.54841;
    // 240 seconds of time per degree
    let rad = (gmst_s / 240.0).to_radians().rem_euclid(TAU);
    Angle::from_radians(rad)
}

/// Rotate an ECI position [km] into the Earth-fixed frame and convert to WGS-84
pub fn eci_to_geodetic(position_km: &Vector3<f64>, gmst: Angle) -> GeodeticCoordinates {
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst.as_radians());
    let ecef_km = rot * position_km;
    let ecef = ECEF::new(
        Length::from_kilometers(ecef_km.x).as_meters(),
        Length::from_kilometers(ecef_km.y).as_meters(),
        Length::from_kilometers(ecef_km.z).as_meters(),
    );
    let wgs = WGS84::from(ecef);
    GeodeticCoordinates {
        latitude_rad: wgs.latitude_radians(),
        longitude_rad: wgs.longitude_radians(),
        height_km: Length::from_meters(wgs.altitude()).as_kilometers(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use orbit_types::EARTH_RADIUS_KM;

    const POLAR_RADIUS_KM: f64 = 6356.752314;

    #[test]
    fn gmst_at_j2000() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(julian_date(j2000), JULIAN_DATE_J2000);
        assert_relative_eq!(
            greenwich_sidereal_time(j2000).as_degrees(),
            280.46061837,
            epsilon = 1e-6
        );
    }

    #[test]
    fn gmst_advances_one_sidereal_day() {
        let t0 = Utc.with_ymd_and_hms(2024, 4, 13, 0, 0, 0).unwrap();
        let t1 = t0 + chrono::Duration::seconds(86_164);
        let g0 = greenwich_sidereal_time(t0).as_degrees();
        let g1 = greenwich_sidereal_time(t1).as_degrees();
        assert_relative_eq!(g0, g1, epsilon = 0.01);
    }

    #[test]
    fn equatorial_point() {
        let p = Vector3::new(EARTH_RADIUS_KM + 400.0, 0.0, 0.0);
        let c = eci_to_geodetic(&p, Angle::from_degrees(0.0));
        assert_relative_eq!(c.latitude_rad, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c.longitude_rad, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c.height_km, 400.0, epsilon = 1e-6);
    }

    #[test]
    fn sidereal_rotation() {
        // ECI +Y under a 90° sidereal angle sits over the prime meridian
        let p = Vector3::new(0.0, EARTH_RADIUS_KM + 1000.0, 0.0);
        let c = eci_to_geodetic(&p, Angle::from_degrees(90.0));
        assert_relative_eq!(c.longitude_rad, 0.0, epsilon = 1e-9);

        let c = eci_to_geodetic(&p, Angle::from_degrees(0.0));
        assert_relative_eq!(c.longitude_rad.to_degrees(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn polar_point() {
        let p = Vector3::new(0.0, 0.0, POLAR_RADIUS_KM + 500.0);
        let c = eci_to_geodetic(&p, Angle::from_degrees(123.0));
        assert_relative_eq!(c.latitude_rad.to_degrees(), 90.0, epsilon = 1e-6);
        assert_relative_eq!(c.height_km, 500.0, epsilon = 1e-3);
    }

    #[test]
    fn boundary_units() {
        let pos = GeodeticPosition::from(GeodeticCoordinates {
            latitude_rad: std::f64::consts::FRAC_PI_4,
            longitude_rad: -std::f64::consts::FRAC_PI_2,
            height_km: 35_786.0,
        });
        assert_relative_eq!(pos.latitude.as_degrees(), 45.0);
        assert_relative_eq!(pos.longitude.as_degrees(), -90.0);
        assert_relative_eq!(pos.altitude.as_meters(), 35_786_000.0);
    }
}
