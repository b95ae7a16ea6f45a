//! A lightweight uom-ish set of units for the values that cross the output boundary.
//!
//! Distances are carried in kilometers internally and leave as meters;
//! angles leave as degrees.

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle { degrees }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle {
            degrees: radians.to_degrees(),
        }
    }

    pub fn as_degrees(&self) -> f64 {
        self.degrees
    }

    pub fn as_radians(&self) -> f64 {
        self.degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn length_conversions() {
        let l = Length::from_kilometers(408.5);
        assert_relative_eq!(l.as_meters(), 408_500.0);
        assert_relative_eq!(l.as_kilometers(), 408.5);
        assert_relative_eq!(Length::from_meters(500.0).as_kilometers(), 0.5);
    }

    #[test]
    fn angle_conversions() {
        let a = Angle::from_radians(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(a.as_degrees(), 90.0);
        assert_relative_eq!(a.as_radians(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(Angle::from_degrees(-90.0).as_radians(), -std::f64::consts::FRAC_PI_2);
    }
}
