use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Cap on the number of records carried through the pipeline
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    High,
    #[default]
    Ultra,
    Extreme,
    Unlimited,
}

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("Unknown performance tier '{0}', expected one of low, medium, high, ultra, extreme, unlimited")]
pub struct UnknownTier(pub String);

impl PerformanceTier {
    pub const ALL: [PerformanceTier; 6] = [
        PerformanceTier::Low,
        PerformanceTier::Medium,
        PerformanceTier::High,
        PerformanceTier::Ultra,
        PerformanceTier::Extreme,
        PerformanceTier::Unlimited,
    ];

    /// Maximum record count, `None` when unbounded
    pub fn cap(&self) -> Option<usize> {
        use PerformanceTier::*;
        match self {
            Low => Some(1_000),
            Medium => Some(5_000),
            High => Some(10_000),
            Ultra => Some(20_000),
            Extreme => Some(50_000),
            Unlimited => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use PerformanceTier::*;
        match self {
            Low => "low",
            Medium => "medium",
            High => "high",
            Ultra => "ultra",
            Extreme => "extreme",
            Unlimited => "unlimited",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.trim().to_ascii_lowercase();
        PerformanceTier::ALL
            .into_iter()
            .find(|t| t.as_str() == s_lower)
            .ok_or_else(|| UnknownTier(s.to_owned()))
    }
}
