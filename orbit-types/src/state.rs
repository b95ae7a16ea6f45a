use crate::{category::Category, elements::OrbitalElements, orbit::OrbitRegime};
use derive_more::Display;
use serde::Serialize;

/// ECI velocity [km/s]
#[derive(Copy, Clone, PartialEq, Debug, Default, Display, Serialize)]
#[display(fmt = "[{}, {}, {}] km/s", "x", "y", "z")]
pub struct VelocityKmS {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<na::Vector3<f64>> for VelocityKmS {
    fn from(v: na::Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl VelocityKmS {
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Position and classification of one object at one timestamp
#[derive(Clone, PartialEq, Debug, Display, Serialize)]
#[display(
    fmt = "{{name: {}, lat: {}, lng: {}, alt: {} m, {}, {}}}",
    "name",
    "lat",
    "lng",
    "alt",
    "category",
    "orbit_regime"
)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteState {
    pub name: String,
    /// Geodetic latitude [deg]
    pub lat: f64,
    /// Geodetic longitude [deg]
    pub lng: f64,
    /// Height above the WGS-84 ellipsoid [m]
    pub alt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<VelocityKmS>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbital_elements: Option<OrbitalElements>,
    pub category: Category,
    pub orbit_regime: OrbitRegime,
}

impl SatelliteState {
    pub fn altitude_km(&self) -> f64 {
        self.alt / 1000.0
    }
}
