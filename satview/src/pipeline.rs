//! Batch orchestration: parse, budget, then per-record extraction, propagation,
//! geodetic conversion and classification.
//!
//! Per-record work fans out over a rayon pool. Every result stays tagged with
//! its position in the budgeted record slice and indexed collection keeps that
//! order, so the output is the budgeted input order minus the failures.

use chrono::Duration;
use orbit_types::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::{fs, io, path::Path, path::PathBuf};
use tle_protocol::{extract_elements, parse_tle_set_with, FieldParseError, ScanMode};
use tracing::{debug, info};

use crate::{
    budget,
    classification::Classifier,
    propagation::{
        PropagationAdapter, PropagationEngine, PropagationError, PropagatorHandle, Sgp4Engine,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to read TLE source '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Time series step must be positive, got {0}")]
    NonPositiveStep(Duration),
    #[error("Time series exceeds {max} timesteps")]
    TooManySteps { max: usize },
}

/// Upper bound on the frames of one series
pub const MAX_TIMESTEPS: usize = 100_000;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PipelineOptions {
    pub tier: PerformanceTier,
    pub epoch_pivot: EpochPivot,
    pub scan_mode: ScanMode,
    /// Fan per-record work out over the rayon pool
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            tier: PerformanceTier::default(),
            epoch_pivot: EpochPivot::default(),
            scan_mode: ScanMode::default(),
            parallel: true,
        }
    }
}

/// A per-record fault, tagged with the record's index in the budgeted set
#[derive(Clone, PartialEq, Debug)]
pub struct RecordFault<E> {
    pub index: usize,
    pub name: String,
    /// Set for faults raised at a specific timestep
    pub at: Option<UtcTimestamp>,
    pub error: E,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct BatchReport {
    /// Accepted TLE records
    pub parsed: usize,
    /// Rejected 3-line windows
    pub rejected: usize,
    pub trailing_lines: usize,
    /// Records left after the tier cap
    pub budgeted: usize,
    pub element_faults: Vec<RecordFault<FieldParseError>>,
    pub propagation_faults: Vec<RecordFault<PropagationError>>,
}

/// The state list for one timestamp
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Frame {
    pub timestamp: UtcTimestamp,
    pub states: Vec<SatelliteState>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Snapshot {
    pub frame: Frame,
    pub report: BatchReport,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Series {
    pub frames: Vec<Frame>,
    pub report: BatchReport,
}

/// A budgeted record with everything that doesn't depend on time
struct Prepared<H> {
    index: usize,
    name: String,
    elements: Result<OrbitalElements, FieldParseError>,
    handle: Result<PropagatorHandle<H>, PropagationError>,
}

impl<H> Prepared<H> {
    fn fault<F>(&self, at: Option<UtcTimestamp>, error: F) -> RecordFault<F> {
        RecordFault {
            index: self.index,
            name: self.name.clone(),
            at,
            error,
        }
    }
}

pub struct Pipeline<E = Sgp4Engine> {
    adapter: PropagationAdapter<E>,
    classifier: Classifier,
    options: PipelineOptions,
}

impl Pipeline<Sgp4Engine> {
    pub fn new(classifier: Classifier, options: PipelineOptions) -> Self {
        Self::with_engine(Sgp4Engine, classifier, options)
    }
}

impl<E: PropagationEngine> Pipeline<E> {
    pub fn with_engine(engine: E, classifier: Classifier, options: PipelineOptions) -> Self {
        Self {
            adapter: PropagationAdapter::new(engine),
            classifier,
            options,
        }
    }

    pub fn run(&self, text: &str, at: UtcTimestamp) -> Snapshot {
        let mut series = self.evaluate(text, &[at]);
        let frame = series.frames.pop().unwrap_or(Frame {
            timestamp: at,
            states: Vec::new(),
        });
        Snapshot {
            frame,
            report: series.report,
        }
    }

    pub fn run_file<P: AsRef<Path>>(
        &self,
        path: P,
        at: UtcTimestamp,
    ) -> Result<Snapshot, PipelineError> {
        let text = load_tle_text(path)?;
        Ok(self.run(&text, at))
    }

    /// Evaluate every timestep from `start` to `end`, both inclusive.
    ///
    /// Propagator handles are initialized once and shared by all steps.
    pub fn run_series(
        &self,
        text: &str,
        start: UtcTimestamp,
        end: UtcTimestamp,
        step: Duration,
    ) -> Result<Series, PipelineError> {
        let timesteps = timesteps(start, end, step)?;
        Ok(self.evaluate(text, &timesteps))
    }

    fn evaluate(&self, text: &str, timesteps: &[UtcTimestamp]) -> Series {
        let set = parse_tle_set_with(text, self.options.scan_mode);
        let budgeted = budget::select(&set.records, self.options.tier);
        info!(
            parsed = set.len(),
            rejected = set.rejected.len(),
            budgeted = budgeted.len(),
            tier = %self.options.tier,
            "Parsed TLE set"
        );

        let mut report = BatchReport {
            parsed: set.len(),
            rejected: set.rejected.len(),
            trailing_lines: set.trailing_lines,
            budgeted: budgeted.len(),
            ..Default::default()
        };

        let prepared = self.fan_out(budgeted, |index, tle| self.prepare(index, tle));
        for p in prepared.iter() {
            if let Err(error) = &p.elements {
                debug!(index = p.index, name = %p.name, %error, "Orbital elements unavailable");
                report.element_faults.push(p.fault(None, error.clone()));
            }
            if let Err(error) = &p.handle {
                debug!(index = p.index, name = %p.name, %error, "Propagator initialization failed");
                report.propagation_faults.push(p.fault(None, error.clone()));
            }
        }

        let mut frames = Vec::with_capacity(timesteps.len());
        for &at in timesteps {
            let outcomes = self.fan_out(&prepared, |_, p| self.state_at(p, at));
            let mut states = Vec::with_capacity(outcomes.len());
            for outcome in outcomes.into_iter().flatten() {
                match outcome {
                    Ok(s) => states.push(s),
                    Err(f) => {
                        debug!(index = f.index, name = %f.name, %at, error = %f.error, "Propagation failed");
                        report.propagation_faults.push(f);
                    }
                }
            }
            info!(%at, states = states.len(), "Propagated batch");
            frames.push(Frame {
                timestamp: at,
                states,
            });
        }

        Series { frames, report }
    }

    fn prepare(&self, index: usize, tle: &TleRecord) -> Prepared<E::Handle> {
        Prepared {
            index,
            name: tle.name.clone(),
            elements: extract_elements(tle, self.options.epoch_pivot),
            handle: self.adapter.initialize(tle),
        }
    }

    /// `None` for records whose handle never initialized, those are reported once
    fn state_at(
        &self,
        p: &Prepared<E::Handle>,
        at: UtcTimestamp,
    ) -> Option<Result<SatelliteState, RecordFault<PropagationError>>> {
        let handle = p.handle.as_ref().ok()?;
        let eci = match self.adapter.propagate(handle, at) {
            Ok(eci) => eci,
            Err(error) => return Some(Err(p.fault(Some(at), error))),
        };
        let pos = self.adapter.geodetic(&eci, at);
        Some(Ok(SatelliteState {
            name: p.name.clone(),
            lat: pos.latitude.as_degrees(),
            lng: pos.longitude.as_degrees(),
            alt: pos.altitude.as_meters(),
            velocity: Some(eci.velocity.into()),
            orbital_elements: p.elements.as_ref().ok().cloned(),
            category: self.classifier.category(&p.name),
            orbit_regime: self.classifier.regime(pos.altitude.as_kilometers()),
        }))
    }

    fn fan_out<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync + Send,
    {
        if self.options.parallel {
            items.par_iter().enumerate().map(|(i, t)| f(i, t)).collect()
        } else {
            items.iter().enumerate().map(|(i, t)| f(i, t)).collect()
        }
    }
}

pub fn load_tle_text<P: AsRef<Path>>(path: P) -> Result<String, PipelineError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_owned(),
        source,
    })
}

/// `start..=end` in `step` increments
pub fn timesteps(
    start: UtcTimestamp,
    end: UtcTimestamp,
    step: Duration,
) -> Result<Vec<UtcTimestamp>, PipelineError> {
    if step <= Duration::zero() {
        return Err(PipelineError::NonPositiveStep(step));
    }
    let mut out = Vec::new();
    let mut next = Some(start);
    while let Some(t) = next.filter(|t| *t <= end) {
        if out.len() == MAX_TIMESTEPS {
            return Err(PipelineError::TooManySteps { max: MAX_TIMESTEPS });
        }
        out.push(t);
        next = t.checked_add_signed(step);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::EciState;
    use chrono::{TimeZone, Utc};
    use na::Vector3;

    /// Circular equatorial orbit, altitude encoded in the catalog number [km].
    /// Catalog number 00000 fails propagation.
    struct FakeEngine;

    impl PropagationEngine for FakeEngine {
        type Handle = f64;

        fn initialize(&self, line1: &str, _: &str) -> Result<f64, PropagationError> {
            line1
                .get(2..7)
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| PropagationError::BadElements(line1.to_owned()))
        }

        fn propagate(&self, alt_km: &f64, _: UtcTimestamp) -> Result<EciState, PropagationError> {
            if *alt_km == 0.0 {
                return Err(PropagationError::Diverged("fake".to_owned()));
            }
            Ok(EciState {
                position: Vector3::new(EARTH_RADIUS_KM + alt_km, 0.0, 0.0),
                velocity: Vector3::new(0.0, 7.5, 0.0),
            })
        }
    }

    fn fake_tle(name: &str, alt_km: u32) -> String {
        format!("0 {name}\n1 {alt_km:05}U\n2 {alt_km:05}\n")
    }

    fn at() -> UtcTimestamp {
        Utc.with_ymd_and_hms(2024, 4, 14, 0, 0, 0).unwrap()
    }

    fn pipeline(options: PipelineOptions) -> Pipeline<FakeEngine> {
        Pipeline::with_engine(FakeEngine, Classifier::default(), options)
    }

    fn names(states: &[SatelliteState]) -> Vec<&str> {
        states.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn one_failure_is_isolated() {
        let text: String = [
            fake_tle("STARLINK-1", 550),
            fake_tle("NOAA 20", 824),
            fake_tle("BROKEN", 0),
            fake_tle("GPS BIIR-2", 20_200),
            fake_tle("INTELSAT 901", 35_790),
        ]
        .concat();

        for parallel in [true, false] {
            let p = pipeline(PipelineOptions {
                parallel,
                ..Default::default()
            });
            let snap = p.run(&text, at());
            assert_eq!(
                names(&snap.frame.states),
                vec!["STARLINK-1", "NOAA 20", "GPS BIIR-2", "INTELSAT 901"]
            );
            assert_eq!(snap.report.parsed, 5);
            assert_eq!(snap.report.propagation_faults.len(), 1);
            let fault = &snap.report.propagation_faults[0];
            assert_eq!(fault.index, 2);
            assert_eq!(fault.name, "BROKEN");
            assert_eq!(fault.at, Some(at()));

            let regimes: Vec<OrbitRegime> =
                snap.frame.states.iter().map(|s| s.orbit_regime).collect();
            assert_eq!(
                regimes,
                vec![OrbitRegime::Leo, OrbitRegime::Leo, OrbitRegime::Meo, OrbitRegime::Geo]
            );
            assert_eq!(snap.frame.states[0].category, Category::Starlink);
            assert!((snap.frame.states[0].alt - 550_000.0).abs() < 1.0);
        }
    }

    #[test]
    fn fake_lines_have_no_elements() {
        let snap = pipeline(PipelineOptions::default()).run(&fake_tle("A", 400), at());
        assert_eq!(snap.frame.states.len(), 1);
        assert!(snap.frame.states[0].orbital_elements.is_none());
        assert!(matches!(
            snap.report.element_faults[0].error,
            FieldParseError::Truncated { .. }
        ));
    }

    #[test]
    fn init_failure_reported_once() {
        let text = format!("{}0 BAD\n1 xx\n2 xx\n", fake_tle("A", 400));
        let start = at();
        let series = pipeline(PipelineOptions::default())
            .run_series(&text, start, start + Duration::minutes(2), Duration::minutes(1))
            .unwrap();
        assert_eq!(series.frames.len(), 3);
        assert!(series.frames.iter().all(|f| names(&f.states) == vec!["A"]));
        assert_eq!(series.report.propagation_faults.len(), 1);
        assert!(matches!(
            series.report.propagation_faults[0].error,
            PropagationError::BadElements(_)
        ));
        assert_eq!(series.report.propagation_faults[0].at, None);
    }

    #[test]
    fn tier_caps_in_parse_order() {
        let text: String = (0..1_500)
            .map(|i| fake_tle(&format!("SAT-{i}"), 400 + i % 7))
            .collect();
        let p = pipeline(PipelineOptions {
            tier: PerformanceTier::Low,
            ..Default::default()
        });
        let snap = p.run(&text, at());
        assert_eq!(snap.report.parsed, 1_500);
        assert_eq!(snap.report.budgeted, 1_000);
        assert_eq!(snap.frame.states.len(), 1_000);
        for (i, s) in snap.frame.states.iter().enumerate() {
            assert_eq!(s.name, format!("SAT-{i}"));
        }
    }

    #[test]
    fn series_timesteps() {
        let start = at();
        let ts = timesteps(start, start + Duration::seconds(90), Duration::seconds(30)).unwrap();
        assert_eq!(ts.len(), 4);
        assert_eq!(ts[3], start + Duration::seconds(90));
        assert_eq!(timesteps(start, start, Duration::seconds(1)).unwrap(), vec![start]);
        let before = start - Duration::seconds(1);
        assert!(timesteps(start, before, Duration::seconds(1))
            .unwrap()
            .is_empty());
        assert!(matches!(
            timesteps(start, start, Duration::zero()),
            Err(PipelineError::NonPositiveStep(_))
        ));
    }

    #[test]
    fn series_stops_at_end_of_time() {
        let last = chrono::DateTime::<Utc>::MAX_UTC;
        let ts = timesteps(last - Duration::days(2), last, Duration::days(1)).unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts[2], last);
    }

    #[test]
    fn series_step_limit() {
        let start = at();
        assert!(matches!(
            timesteps(start, start + Duration::days(365), Duration::seconds(1)),
            Err(PipelineError::TooManySteps { max: MAX_TIMESTEPS })
        ));
        let ts = timesteps(
            start,
            start + Duration::seconds(MAX_TIMESTEPS as i64 - 1),
            Duration::seconds(1),
        )
        .unwrap();
        assert_eq!(ts.len(), MAX_TIMESTEPS);
    }

    #[test]
    fn missing_file_is_fatal() {
        let p = pipeline(PipelineOptions::default());
        let err = p.run_file("/nonexistent/tle.txt", at()).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to read TLE source '/nonexistent/tle.txt'"
        );
    }
}
