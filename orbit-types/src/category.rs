use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Display grouping for an object, derived from its name
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Starlink,
    GpsNavstar,
    Glonass,
    Galileo,
    Beidou,
    Iridium,
    Oneweb,
    Intelsat,
    Geostationary,
    Scientific,
    Military,
    Commercial,
    Debris,
    Default,
}

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("Unknown satellite category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Starlink,
        Category::GpsNavstar,
        Category::Glonass,
        Category::Galileo,
        Category::Beidou,
        Category::Iridium,
        Category::Oneweb,
        Category::Intelsat,
        Category::Geostationary,
        Category::Scientific,
        Category::Military,
        Category::Commercial,
        Category::Debris,
        Category::Default,
    ];

    /// The tag as it appears in configuration and output, e.g. "GPS_NAVSTAR"
    pub fn as_str(&self) -> &'static str {
        use Category::*;
        match self {
            Starlink => "STARLINK",
            GpsNavstar => "GPS_NAVSTAR",
            Glonass => "GLONASS",
            Galileo => "GALILEO",
            Beidou => "BEIDOU",
            Iridium => "IRIDIUM",
            Oneweb => "ONEWEB",
            Intelsat => "INTELSAT",
            Geostationary => "GEOSTATIONARY",
            Scientific => "SCIENTIFIC",
            Military => "MILITARY",
            Commercial => "COMMERCIAL",
            Debris => "DEBRIS",
            Default => "DEFAULT",
        }
    }

    /// Legend label, e.g. "GPS NAVSTAR"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn description(&self) -> &'static str {
        use Category::*;
        match self {
            Starlink => "SpaceX Starlink Internet Constellation",
            GpsNavstar => "GPS Navigation Satellites",
            Glonass => "Russian Global Navigation System",
            Galileo => "European Global Navigation System",
            Beidou => "Chinese Global Navigation System",
            Iridium => "Iridium Communications Constellation",
            Oneweb => "OneWeb Internet Constellation",
            Intelsat => "Intelsat Commercial Satellites",
            Geostationary => "Geostationary Commercial Satellites",
            Scientific => "Scientific & Research Satellites",
            Military => "Military & Defense Satellites",
            Commercial => "Other Commercial Satellites",
            Debris => "Space Debris & Rocket Bodies",
            Default => "Unclassified Satellites",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase().replace(' ', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
