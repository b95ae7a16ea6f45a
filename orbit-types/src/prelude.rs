pub use crate::category::{Category, UnknownCategory};
pub use crate::elements::{EpochPivot, OrbitalElements};
pub use crate::orbit::OrbitRegime;
pub use crate::state::{SatelliteState, VelocityKmS};
pub use crate::tier::{PerformanceTier, UnknownTier};
pub use crate::tle::TleRecord;
pub use crate::{EARTH_RADIUS_KM, MINUTES_PER_DAY, MU_EARTH_KM3_S2, SECONDS_PER_DAY};

pub type UtcTimestamp = chrono::DateTime<chrono::Utc>;
