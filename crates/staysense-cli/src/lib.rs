//! StaySense command-line runner
//!
//! Fits the preprocessing pipeline on a labeled JSON batch, transforms a
//! second batch and optionally scores it with a linear classifier.

pub mod config;
pub mod runner;

pub use config::CliConfig;
pub use runner::{run, Report};
