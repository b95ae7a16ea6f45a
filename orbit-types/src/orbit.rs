use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Coarse orbit classification by altitude
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrbitRegime {
    #[display(fmt = "LEO")]
    Leo,
    #[display(fmt = "MEO")]
    Meo,
    #[display(fmt = "GEO")]
    Geo,
    #[display(fmt = "HEO")]
    Heo,
}

impl OrbitRegime {
    /// Ordered by altitude
    pub const ALL: [OrbitRegime; 4] = [
        OrbitRegime::Leo,
        OrbitRegime::Meo,
        OrbitRegime::Geo,
        OrbitRegime::Heo,
    ];

    pub fn display_name(&self) -> &'static str {
        use OrbitRegime::*;
        match self {
            Leo => "Low Earth Orbit (LEO)",
            Meo => "Medium Earth Orbit (MEO)",
            Geo => "Geostationary Orbit (GEO)",
            Heo => "High Earth Orbit (HEO)",
        }
    }

    pub fn description(&self) -> &'static str {
        use OrbitRegime::*;
        match self {
            Leo => "Below 2,000 km altitude - Most Earth observation and communication satellites",
            Meo => "2,000-35,786 km altitude - GPS and navigation satellites",
            Geo => "~35,786 km altitude - Geostationary communication satellites",
            Heo => "Above 35,800 km altitude - Deep space and specialized satellites",
        }
    }

    /// Legend color, hex RGB
    pub fn color(&self) -> &'static str {
        use OrbitRegime::*;
        match self {
            Leo => "#00ff00",
            Meo => "#ffff00",
            Geo => "#ff0000",
            Heo => "#ff00ff",
        }
    }
}
