//! Adapter over an external mean-element propagation engine

use na::Vector3;
use orbit_types::prelude::*;
use std::borrow::Cow;
use tracing::debug;

use crate::{
    geodetic::{self, GeodeticCoordinates, GeodeticPosition},
    units::Angle,
};

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum PropagationError {
    #[error("Orbit has decayed (radius {radius_km:.1} km)")]
    Decayed { radius_km: f64 },
    #[error("Malformed mean elements: {0}")]
    BadElements(String),
    #[error("Propagation diverged: {0}")]
    Diverged(String),
}

/// Earth-centered inertial state
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EciState {
    /// [km]
    pub position: Vector3<f64>,
    /// [km/s]
    pub velocity: Vector3<f64>,
}

/// The capability the pipeline needs from a propagation engine.
///
/// Handles are created once per record and reused for every timestamp,
/// so they must be shareable across the worker pool.
pub trait PropagationEngine: Send + Sync {
    type Handle: Send + Sync;

    fn initialize(&self, line1: &str, line2: &str) -> Result<Self::Handle, PropagationError>;

    fn propagate(
        &self,
        handle: &Self::Handle,
        at: UtcTimestamp,
    ) -> Result<EciState, PropagationError>;

    fn sidereal_time(&self, at: UtcTimestamp) -> Angle {
        geodetic::greenwich_sidereal_time(at)
    }

    fn eci_to_geodetic(&self, position_km: &Vector3<f64>, gmst: Angle) -> GeodeticCoordinates {
        geodetic::eci_to_geodetic(position_km, gmst)
    }
}

/// SGP4/SDP4 via the `sgp4` crate
#[derive(Copy, Clone, Debug, Default)]
pub struct Sgp4Engine;

pub struct Sgp4Handle {
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl PropagationEngine for Sgp4Engine {
    type Handle = Sgp4Handle;

    fn initialize(&self, line1: &str, line2: &str) -> Result<Sgp4Handle, PropagationError> {
        let line1 = with_checksum(line1);
        let line2 = with_checksum(line2);
        let elements = sgp4::Elements::from_tle(None, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| PropagationError::BadElements(e.to_string()))?;
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| PropagationError::BadElements(e.to_string()))?;
        Ok(Sgp4Handle {
            elements,
            constants,
        })
    }

    fn propagate(&self, handle: &Sgp4Handle, at: UtcTimestamp) -> Result<EciState, PropagationError> {
        let dt = at.naive_utc() - handle.elements.datetime;
        let minutes = dt.num_milliseconds() as f64 / 60_000.0;
        let prediction = handle
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| PropagationError::Diverged(e.to_string()))?;
        Ok(EciState {
            position: Vector3::from(prediction.position),
            velocity: Vector3::from(prediction.velocity),
        })
    }
}

/// Modulo-10 checksum over columns 1-68: digits count their value, '-' counts 1
pub fn line_checksum(line: &str) -> Option<u8> {
    let body = line.as_bytes().get(..CHECKSUM_COLUMN)?;
    let sum: u32 = body
        .iter()
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum();
    Some((sum % 10) as u8)
}

const CHECKSUM_COLUMN: usize = 68;

/// Rewrite column 69 with the computed checksum, the engine refuses a stale digit.
///
/// Lines too short to hold a checksum pass through unchanged.
fn with_checksum(line: &str) -> Cow<'_, str> {
    let (Some(expected), Some(&found)) = (line_checksum(line), line.as_bytes().get(CHECKSUM_COLUMN))
    else {
        return Cow::Borrowed(line);
    };
    let expected = b'0' + expected;
    if found == expected || !found.is_ascii() {
        return Cow::Borrowed(line);
    }
    debug!(
        line,
        found = %char::from(found),
        expected = %char::from(expected),
        "Replacing TLE checksum digit"
    );
    let mut fixed = String::with_capacity(line.len());
    fixed.push_str(&line[..CHECKSUM_COLUMN]);
    fixed.push(char::from(expected));
    fixed.push_str(&line[CHECKSUM_COLUMN + 1..]);
    Cow::Owned(fixed)
}

/// Opaque per-record engine state
pub struct PropagatorHandle<H>(H);

/// Owns the engine and every handle it produces
#[derive(Debug, Default)]
pub struct PropagationAdapter<E> {
    engine: E,
}

impl<E: PropagationEngine> PropagationAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn initialize(&self, tle: &TleRecord) -> Result<PropagatorHandle<E::Handle>, PropagationError> {
        self.engine
            .initialize(&tle.line1, &tle.line2)
            .map(PropagatorHandle)
    }

    /// Propagate and screen the result.
    ///
    /// Non-finite output is reported as divergence, and a position inside the
    /// reference sphere as decay.
    pub fn propagate(
        &self,
        handle: &PropagatorHandle<E::Handle>,
        at: UtcTimestamp,
    ) -> Result<EciState, PropagationError> {
        let state = self.engine.propagate(&handle.0, at)?;
        if !state.position.iter().chain(state.velocity.iter()).all(|v| v.is_finite()) {
            return Err(PropagationError::Diverged(
                "non-finite state vector".to_owned(),
            ));
        }
        let radius_km = state.position.norm();
        if radius_km < EARTH_RADIUS_KM {
            return Err(PropagationError::Decayed { radius_km });
        }
        Ok(state)
    }

    pub fn geodetic(&self, eci: &EciState, at: UtcTimestamp) -> GeodeticPosition {
        let gmst = self.engine.sidereal_time(at);
        self.engine.eci_to_geodetic(&eci.position, gmst).into()
    }
}
