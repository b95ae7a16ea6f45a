//! Name and altitude based classification

use orbit_types::prelude::*;
use serde::Deserialize;

/// One row of the category table: any keyword contained in the
/// (upper-cased) object name selects the category
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CategoryRule {
    category: Category,
    keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .collect(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, upper_name: &str) -> bool {
        self.keywords.iter().any(|k| upper_name.contains(k.as_str()))
    }
}

/// Ordered rule table, first match wins
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    pub fn classify(&self, name: &str) -> Category {
        let upper = name.to_uppercase();
        self.rules
            .iter()
            .find(|r| r.matches(&upper))
            .map(|r| r.category)
            .unwrap_or(Category::Default)
    }
}

impl Default for CategoryRules {
    /// Constellations before the broad operator and substring buckets
    fn default() -> Self {
        use Category::*;
        Self::new(vec![
            CategoryRule::new(Starlink, ["STARLINK"]),
            CategoryRule::new(GpsNavstar, ["NAVSTAR", "GPS"]),
            CategoryRule::new(Glonass, ["GLONASS"]),
            CategoryRule::new(Galileo, ["GALILEO"]),
            CategoryRule::new(Beidou, ["BEIDOU", "COMPASS"]),
            CategoryRule::new(Iridium, ["IRIDIUM"]),
            CategoryRule::new(Oneweb, ["ONEWEB"]),
            CategoryRule::new(Intelsat, ["INTELSAT"]),
            CategoryRule::new(
                Scientific,
                [
                    "EXPLORER", "VANGUARD", "TIROS", "GOES", "NOAA", "METEOSAT", "LANDSAT",
                    "TERRA", "AQUA", "SPOT", "SENTINEL", "MODIS",
                ],
            ),
            CategoryRule::new(Military, ["USA ", "NROL", "DSCS", "MILSTAR", "AEHF", "WGS"]),
            CategoryRule::new(Debris, ["DEB", "DEBRIS", "FRAG", "R/B", "ROCKET BODY"]),
            CategoryRule::new(
                Geostationary,
                [
                    "GEO",
                    "GEOSTATIONARY",
                    "EUTELSAT",
                    "ASTRA",
                    "HOTBIRD",
                    "DIRECTV",
                    "DISH",
                    "ECHOSTAR",
                    "ARABSAT",
                    "TURKSAT",
                    "HISPASAT",
                ],
            ),
            CategoryRule::new(Commercial, ["SAT", "COM", "TELESAT", "SIRIUS", "XM", "ORBCOMM"]),
        ])
    }
}

/// Upper altitude bounds [km] of each regime, exclusive
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OrbitThresholds {
    pub leo_max_km: f64,
    pub meo_max_km: f64,
    pub geo_max_km: f64,
}

impl Default for OrbitThresholds {
    fn default() -> Self {
        Self {
            leo_max_km: 2_000.0,
            meo_max_km: 35_786.0,
            geo_max_km: 35_800.0,
        }
    }
}

impl OrbitThresholds {
    pub fn is_increasing(&self) -> bool {
        self.leo_max_km < self.meo_max_km && self.meo_max_km < self.geo_max_km
    }

    pub fn regime(&self, altitude_km: f64) -> OrbitRegime {
        if altitude_km < self.leo_max_km {
            OrbitRegime::Leo
        } else if altitude_km < self.meo_max_km {
            OrbitRegime::Meo
        } else if altitude_km < self.geo_max_km {
            OrbitRegime::Geo
        } else {
            OrbitRegime::Heo
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Classifier {
    rules: CategoryRules,
    thresholds: OrbitThresholds,
}

impl Classifier {
    pub fn new(rules: CategoryRules, thresholds: OrbitThresholds) -> Self {
        Self { rules, thresholds }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    pub fn thresholds(&self) -> &OrbitThresholds {
        &self.thresholds
    }

    pub fn category(&self, name: &str) -> Category {
        self.rules.classify(name)
    }

    pub fn regime(&self, altitude_km: f64) -> OrbitRegime {
        self.thresholds.regime(altitude_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_thresholds() {
        let c = Classifier::default();
        assert_eq!(c.regime(400.0), OrbitRegime::Leo);
        assert_eq!(c.regime(1_999.9), OrbitRegime::Leo);
        assert_eq!(c.regime(2_000.0), OrbitRegime::Meo);
        assert_eq!(c.regime(20_200.0), OrbitRegime::Meo);
        assert_eq!(c.regime(35_785.9), OrbitRegime::Meo);
        assert_eq!(c.regime(35_786.0), OrbitRegime::Geo);
        assert_eq!(c.regime(35_799.9), OrbitRegime::Geo);
        assert_eq!(c.regime(35_800.0), OrbitRegime::Heo);
        assert_eq!(c.regime(40_000.0), OrbitRegime::Heo);
    }

    #[test]
    fn specific_rules_precede_fallbacks() {
        let c = Classifier::default();
        assert_eq!(c.category("STARLINK-1234"), Category::Starlink);
        assert_eq!(c.category("NOAA-20"), Category::Scientific);
        assert_eq!(c.category("INTELSAT 901"), Category::Intelsat);
        assert_eq!(c.category("ONEWEB-0012"), Category::Oneweb);
        assert_eq!(c.category("GPS BIIR-2  (PRN 13)"), Category::GpsNavstar);
        assert_eq!(c.category("BEIDOU-3 M1"), Category::Beidou);
        assert_eq!(c.category("COSMOS 2251 DEB"), Category::Debris);
        assert_eq!(c.category("SL-16 R/B"), Category::Debris);
        assert_eq!(c.category("USA 245"), Category::Military);
        assert_eq!(c.category("EUTELSAT 7C"), Category::Geostationary);
        assert_eq!(c.category("ORBCOMM FM109"), Category::Commercial);
        assert_eq!(c.category("SES-1 COMSAT"), Category::Commercial);
        assert_eq!(c.category("ISS (ZARYA)"), Category::Default);
    }

    #[test]
    fn case_insensitive() {
        let c = Classifier::default();
        assert_eq!(c.category("starlink-30001"), Category::Starlink);
        assert_eq!(c.category("Glonass-M 755"), Category::Glonass);
    }

    #[test]
    fn custom_table() {
        let rules = CategoryRules::new(vec![
            CategoryRule::new(Category::Commercial, ["sat"]),
            CategoryRule::new(Category::Intelsat, ["intelsat"]),
        ]);
        assert_eq!(rules.iter().next().unwrap().keywords(), ["SAT"]);
        // Order is the table's, not the enum's
        assert_eq!(rules.classify("INTELSAT 901"), Category::Commercial);
        assert_eq!(rules.classify("STARLINK-1"), Category::Default);
    }

    #[test]
    fn custom_thresholds() {
        let t = OrbitThresholds {
            leo_max_km: 1_000.0,
            ..Default::default()
        };
        assert!(t.is_increasing());
        assert_eq!(t.regime(1_500.0), OrbitRegime::Meo);
        assert!(!OrbitThresholds {
            meo_max_km: 40_000.0,
            ..Default::default()
        }
        .is_increasing());
    }
}
