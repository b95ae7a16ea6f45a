extern crate nalgebra as na;

pub mod category;
pub mod elements;
pub mod orbit;
pub mod prelude;
pub mod state;
pub mod tier;
pub mod tle;

/// Equatorial radius of the Earth [km], the reference for apogee/perigee heights
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Standard gravitational parameter of the Earth [km³/s²]
pub const MU_EARTH_KM3_S2: f64 = 398600.4418;

pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
