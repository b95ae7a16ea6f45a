use orbit_types::prelude::*;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, io, path::Path, path::PathBuf};
use tle_protocol::ScanMode;

use crate::{
    classification::{CategoryRule, CategoryRules, Classifier, OrbitThresholds},
    pipeline::PipelineOptions,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub tier: PerformanceTier,
    pub epoch_pivot: EpochPivot,
    pub scan_mode: ScanMode,
    pub parallel: bool,
    pub orbit_thresholds: OrbitThresholds,
    /// Replaces the built-in table when non-empty
    #[serde(alias = "category-rule")]
    pub category_rules: Vec<CategoryRuleConfig>,
    /// Category name → color, overrides on top of the built-in color table
    pub colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tier: PerformanceTier::default(),
            epoch_pivot: EpochPivot::default(),
            scan_mode: ScanMode::default(),
            parallel: true,
            orbit_thresholds: OrbitThresholds::default(),
            category_rules: Vec::new(),
            colors: BTreeMap::new(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryRuleConfig {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        if !cfg.orbit_thresholds.is_increasing() {
            return Err(ConfigError::Invalid(format!(
                "orbit thresholds must be strictly increasing, got {:?}",
                cfg.orbit_thresholds
            )));
        }

        if cfg.epoch_pivot.0 > 99 {
            return Err(ConfigError::Invalid(format!(
                "epoch pivot {} is not a two-digit year",
                cfg.epoch_pivot
            )));
        }

        for rule in cfg.category_rules.iter() {
            if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "category rule '{}' has an empty keyword",
                    rule.category
                )));
            }
        }

        for (category, color) in cfg.colors.iter() {
            category
                .parse::<Category>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if color.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "empty color for category '{category}'"
                )));
            }
        }

        Ok(cfg)
    }

    pub fn classifier(&self) -> Classifier {
        let rules = if self.category_rules.is_empty() {
            CategoryRules::default()
        } else {
            CategoryRules::new(
                self.category_rules
                    .iter()
                    .map(|r| CategoryRule::new(r.category, &r.keywords))
                    .collect(),
            )
        };
        Classifier::new(rules, self.orbit_thresholds)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            tier: self.tier,
            epoch_pivot: self.epoch_pivot,
            scan_mode: self.scan_mode,
            parallel: self.parallel,
        }
    }

    pub fn color_table(&self) -> ColorTable {
        let mut table = ColorTable::default();
        for (category, color) in self.colors.iter() {
            if let Ok(category) = category.parse() {
                table.colors.insert(category, color.trim().to_owned());
            }
        }
        table
    }
}

/// Category → display color, consumed by legend and rendering
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ColorTable {
    colors: BTreeMap<Category, String>,
}

impl Default for ColorTable {
    fn default() -> Self {
        use Category::*;
        let colors = [
            (Starlink, "CYAN"),
            (GpsNavstar, "LIME"),
            (Glonass, "YELLOW"),
            (Galileo, "PURPLE"),
            (Beidou, "PINK"),
            (Iridium, "LIGHTBLUE"),
            (Oneweb, "LIGHTGREEN"),
            (Intelsat, "ORANGE"),
            (Geostationary, "RED"),
            (Scientific, "WHITE"),
            (Military, "GRAY"),
            (Commercial, "GOLD"),
            (Debris, "DARKGRAY"),
            (Default, "CYAN"),
        ]
        .into_iter()
        .map(|(c, color)| (c, color.to_owned()))
        .collect();
        Self { colors }
    }
}

impl ColorTable {
    pub fn color(&self, category: Category) -> &str {
        self.colors
            .get(&category)
            .map(String::as_str)
            .unwrap_or("CYAN")
    }
}
