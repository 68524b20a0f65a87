//! Command-line interface definition.
//!
//! ```bash
//! # bands with default settings, CSV to stdout
//! boll compute bars.csv
//!
//! # override inputs, write the render plan as JSON
//! boll compute bars.csv --length 10 --std-dev 1.5 --offset 2 --format json -o plan.json
//!
//! # generate fixture bars
//! boll demo --count 300 --seed 42 -o bars.csv
//! ```

use std::path::PathBuf;

use boll_core::common::enums::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "boll")]
#[command(author, version, about = "Bollinger Bands over OHLCV bars")]
pub struct Args {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute bands for a CSV of bars
    Compute {
        /// Input CSV with timestamp,open,high,low,close,volume columns
        input: PathBuf,

        /// Settings JSON (nested document or flat override keys)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Window length in bars
        #[arg(long)]
        length: Option<i64>,

        /// Standard deviation multiplier
        #[arg(long)]
        std_dev: Option<f64>,

        /// Window offset in bars
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,

        /// Repair high/low that do not bound open/close instead of failing
        #[arg(long)]
        autofix: bool,

        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write seeded random-walk bars as CSV
    Demo {
        #[arg(long, default_value = "300")]
        count: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Timestamp of the first bar in ms (defaults to now minus `count` minutes)
        #[arg(long, allow_negative_numbers = true)]
        start_ms: Option<i64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the default settings as JSON
    Defaults,
}
