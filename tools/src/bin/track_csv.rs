use chrono::{DateTime, Utc};
use clap::Parser;
use orbit_types::prelude::*;
use satview_lib::{pipeline::load_tle_text, Config, Pipeline};
use std::fs::File;
use std::io::{prelude::*, BufWriter};
use std::path::PathBuf;
use tle_protocol::parse_tle_set_with;

/// Write the ground track of one object as CSV
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Object name, the first case-insensitive match is used
    #[arg(short = 'n', long)]
    name: String,

    /// Configuration toml file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start time (RFC 3339), defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    start: Option<UtcTimestamp>,

    /// Track length
    #[arg(long, default_value = "90min", value_parser = humantime::parse_duration)]
    duration: std::time::Duration,

    /// Time between samples
    #[arg(long, default_value = "1min", value_parser = humantime::parse_duration)]
    step: std::time::Duration,

    /// Use absolute UTC timestamp seconds instead of relative
    #[arg(short = 'a', long)]
    abs_time: bool,

    /// Output file path to write
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// TLE catalog file to read
    input: PathBuf,
}

fn parse_timestamp(s: &str) -> Result<UtcTimestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|t| t.with_timezone(&Utc))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let cfg = match opts.config.as_ref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let text = load_tle_text(&opts.input)?;
    let set = parse_tle_set_with(&text, cfg.scan_mode);
    let tle = set
        .records
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(opts.name.trim()))
        .ok_or_else(|| format!("No object named '{}' in {}", opts.name, opts.input.display()))?;

    let mut options = cfg.pipeline_options();
    options.tier = PerformanceTier::Unlimited;
    let pipeline = Pipeline::new(cfg.classifier(), options);

    let start = opts.start.unwrap_or_else(Utc::now);
    let end = start + chrono::Duration::from_std(opts.duration)?;
    let step = chrono::Duration::from_std(opts.step)?;
    let series = pipeline.run_series(&tle.to_three_line(), start, end, step)?;

    let mut output = BufWriter::new(File::create(&opts.output)?);
    writeln!(&mut output, "t,lat_deg,lng_deg,alt_m,regime")?;
    for frame in series.frames.iter() {
        let t = if opts.abs_time {
            frame.timestamp.timestamp()
        } else {
            (frame.timestamp - start).num_seconds()
        };
        // Steps where propagation failed have no state
        if let Some(s) = frame.states.first() {
            writeln!(
                &mut output,
                "{},{:.6},{:.6},{:.1},{}",
                t, s.lat, s.lng, s.alt, s.orbit_regime
            )?;
        }
    }
    output.flush()?;

    Ok(())
}
