use orbit_types::prelude::*;
use satview_lib::Config;
use std::{collections::HashSet, fs, path::Path};

const CONFIG_FILES: &[&str] = &["default.toml", "low_power.toml", "workstation.toml"];

#[test]
fn example_config_file_list_matches_expected() {
    let cfg_files: HashSet<String> = fs::read_dir("../configs")
        .unwrap()
        .map(|d| d.unwrap().file_name().into_string().unwrap())
        .collect();
    let expected: HashSet<String> = CONFIG_FILES.iter().map(|f| f.to_string()).collect();
    assert_eq!(cfg_files, expected, "Example configs directory is missing an expected config file or contains a new config file that should be tested");
}

#[test]
fn example_config_files_parse() {
    let dir = Path::new("../configs");
    for cfg_file in CONFIG_FILES {
        let p = dir.join(cfg_file);
        if let Err(e) = Config::load(&p) {
            panic!("{}: {e}", p.display());
        }
    }
}

#[test]
fn default_file_matches_builtin() {
    let cfg = Config::load("../configs/default.toml").unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn workstation_file() {
    let cfg = Config::load("../configs/workstation.toml").unwrap();
    assert_eq!(cfg.tier, PerformanceTier::Unlimited);
    let classifier = cfg.classifier();
    assert_eq!(classifier.rules().iter().count(), 4);
    assert_eq!(classifier.category("INTELSAT 901"), Category::Default);
    assert_eq!(classifier.category("SL-16 R/B"), Category::Debris);
    assert_eq!(cfg.color_table().color(Category::Starlink), "#00ffff");
    assert_eq!(cfg.color_table().color(Category::Galileo), "PURPLE");
}
