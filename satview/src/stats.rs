//! Grouping and legend data for rendering collaborators

use orbit_types::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ColorTable;

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeStat {
    pub regime: OrbitRegime,
    pub count: usize,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: Category,
    pub count: usize,
    pub label: String,
    pub description: &'static str,
    pub color: String,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub category: Category,
    pub label: String,
    pub description: &'static str,
    pub color: String,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub regimes: Vec<RegimeStat>,
    pub categories: Vec<CategoryStat>,
}

impl Stats {
    pub fn new(states: &[SatelliteState], colors: &ColorTable) -> Self {
        Self {
            total: states.len(),
            regimes: regime_stats(states),
            categories: category_stats(states, colors),
        }
    }
}

/// Populated regimes, lowest first
pub fn regime_stats(states: &[SatelliteState]) -> Vec<RegimeStat> {
    let counts = count_by(states, |s| s.orbit_regime);
    OrbitRegime::ALL
        .into_iter()
        .filter_map(|regime| {
            counts.get(&regime).map(|&count| RegimeStat {
                regime,
                count,
                label: regime.display_name(),
                description: regime.description(),
                color: regime.color(),
            })
        })
        .collect()
}

/// Populated categories, most common first
pub fn category_stats(states: &[SatelliteState], colors: &ColorTable) -> Vec<CategoryStat> {
    let mut stats: Vec<CategoryStat> = count_by(states, |s| s.category)
        .into_iter()
        .map(|(category, count)| CategoryStat {
            category,
            count,
            label: category.label(),
            description: category.description(),
            color: colors.color(category).to_owned(),
        })
        .collect();
    // Stable, ties stay in category order
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

pub fn legend(colors: &ColorTable) -> Vec<LegendEntry> {
    Category::ALL
        .into_iter()
        .map(|category| LegendEntry {
            category,
            label: category.label(),
            description: category.description(),
            color: colors.color(category).to_owned(),
        })
        .collect()
}

fn count_by<K: Ord, F: Fn(&SatelliteState) -> K>(
    states: &[SatelliteState],
    key: F,
) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for s in states.iter() {
        *counts.entry(key(s)).or_default() += 1;
    }
    counts
}
