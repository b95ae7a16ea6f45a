pub extern crate nalgebra as na;

pub mod budget;
pub mod classification;
pub mod config;
pub mod geodetic;
pub mod pipeline;
pub mod propagation;
pub mod stats;
pub mod units;

pub use crate::config::{ColorTable, Config, ConfigError};
pub use crate::pipeline::{
    BatchReport, Frame, Pipeline, PipelineError, PipelineOptions, RecordFault, Series, Snapshot,
};
