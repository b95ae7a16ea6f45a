use chrono::{DateTime, Utc};
use clap::Parser;
use orbit_types::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use satview_lib::{
    pipeline::load_tle_text,
    stats::{legend, Stats},
    BatchReport, Config, Pipeline,
};

/// Propagate a TLE catalog and print the satellite states as JSON
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Configuration toml file.
    ///
    /// Built-in defaults are used when not provided.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Performance tier (low, medium, high, ultra, extreme, unlimited),
    /// overrides the configuration
    #[arg(long)]
    tier: Option<PerformanceTier>,

    /// Propagation time (RFC 3339), defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    at: Option<UtcTimestamp>,

    /// End of a time series starting at --at (RFC 3339, inclusive)
    #[arg(long, requires = "step", value_parser = parse_timestamp)]
    until: Option<UtcTimestamp>,

    /// Time series step, e.g. "30s" or "5min"
    #[arg(long, requires = "until", value_parser = humantime::parse_duration)]
    step: Option<std::time::Duration>,

    /// Print regime and category statistics with the legend instead of the states
    #[arg(long)]
    stats: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// TLE catalog file in the 3-line format
    tle: PathBuf,
}

fn parse_timestamp(s: &str) -> Result<UtcTimestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|t| t.with_timezone(&Utc))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let opts = Opts::parse();

    let cfg = match opts.config.as_ref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let mut options = cfg.pipeline_options();
    if let Some(tier) = opts.tier {
        options.tier = tier;
    }
    let colors = cfg.color_table();
    let pipeline = Pipeline::new(cfg.classifier(), options);

    let text = load_tle_text(&opts.tle)?;
    let start = opts.at.unwrap_or_else(Utc::now);

    let output = match (opts.until, opts.step) {
        (Some(end), Some(step)) => {
            let series =
                pipeline.run_series(&text, start, end, chrono::Duration::from_std(step)?)?;
            log_report(&series.report);
            if opts.stats {
                let frames: Vec<_> = series
                    .frames
                    .iter()
                    .map(|f| json!({ "timestamp": f.timestamp, "stats": Stats::new(&f.states, &colors) }))
                    .collect();
                json!({ "frames": frames, "legend": legend(&colors) })
            } else {
                serde_json::to_value(&series.frames)?
            }
        }
        _ => {
            let snapshot = pipeline.run(&text, start);
            log_report(&snapshot.report);
            if opts.stats {
                json!({
                    "timestamp": snapshot.frame.timestamp,
                    "stats": Stats::new(&snapshot.frame.states, &colors),
                    "legend": legend(&colors),
                })
            } else {
                serde_json::to_value(&snapshot.frame.states)?
            }
        }
    };

    let out = if opts.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{out}");

    Ok(())
}

fn log_report(report: &BatchReport) {
    info!(
        parsed = report.parsed,
        rejected = report.rejected,
        trailing_lines = report.trailing_lines,
        budgeted = report.budgeted,
        element_faults = report.element_faults.len(),
        propagation_faults = report.propagation_faults.len(),
        "Batch complete"
    );
}
