//! boll command-line driver: CSV bars in, bands out.

pub mod args;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;
pub mod logging;

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use boll_core::common::enums::OutputFormat;
use boll_core::kline::generator::{generate_ohlcv, BAR_INTERVAL_MS};
use boll_core::{build_render_plan, compute, BollError, BollSettings};
use chrono::Utc;
use tracing::info;

pub use args::{Args, Command};
pub use error::{CliError, Result};

/// Settings from an optional JSON file with command-line overrides on top
pub fn resolve_settings(
    path: Option<&Path>,
    length: Option<i64>,
    std_dev: Option<f64>,
    offset: Option<i64>,
) -> Result<BollSettings> {
    let mut settings = match path {
        Some(p) => {
            let text = fs::read_to_string(p).map_err(|e| CliError::io(p, e))?;
            BollSettings::from_json_str(&text)?
        }
        None => BollSettings::default(),
    };

    let mut overrides = HashMap::new();
    if let Some(v) = length {
        overrides.insert("length".to_string(), serde_json::Value::from(v));
    }
    if let Some(v) = std_dev {
        overrides.insert("std_dev".to_string(), serde_json::Value::from(v));
    }
    if let Some(v) = offset {
        overrides.insert("offset".to_string(), serde_json::Value::from(v));
    }
    settings.apply_map(overrides)?;
    Ok(settings)
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Compute {
            input,
            settings,
            length,
            std_dev,
            offset,
            autofix,
            format,
            output,
        } => {
            let settings = resolve_settings(settings.as_deref(), length, std_dev, offset)?;
            let bars = csv_parser::load_bars(&input, autofix)?;
            let points = compute(&bars, &settings.inputs)?;
            info!(
                bars = bars.len(),
                filled = points.iter().filter(|p| !p.is_empty()).count(),
                "computed bands"
            );

            let out = csv_writer::open_output(output.as_deref())?;
            match format {
                OutputFormat::Csv => csv_writer::write_bands_csv(out, &bars, &points),
                OutputFormat::Json => {
                    let plan = build_render_plan(&points, &settings.style)?;
                    csv_writer::write_bands_json(out, &settings, &bars, &points, &plan)
                }
            }
        }
        Command::Demo {
            count,
            seed,
            start_ms,
            output,
        } => {
            let start = match start_ms {
                Some(ms) => ms,
                None => demo_start(count, Utc::now().timestamp_millis())?,
            };
            let bars = generate_ohlcv(count, start, seed)?;
            info!(count, seed, "generated demo bars");
            csv_writer::write_bars_csv(csv_writer::open_output(output.as_deref())?, &bars)
        }
        Command::Defaults => {
            let mut out = csv_writer::open_output(None)?;
            serde_json::to_writer_pretty(&mut out, &BollSettings::default())?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Start time that makes `count` one-minute bars end at `now_ms`
fn demo_start(count: usize, now_ms: i64) -> Result<i64> {
    i64::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(BAR_INTERVAL_MS))
        .and_then(|span| now_ms.checked_sub(span))
        .ok_or_else(|| BollError::para(format!("demo count {} is too large", count)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_start() {
        assert_eq!(demo_start(10, 1_000_000).unwrap(), 1_000_000 - 10 * BAR_INTERVAL_MS);
        match demo_start(usize::MAX, 0).unwrap_err() {
            CliError::Core(e) => assert!(e.is_param_err()),
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn test_demo_overflowing_start_fails() {
        let args = Args {
            verbose: false,
            command: Command::Demo {
                count: 2,
                seed: 1,
                start_ms: Some(i64::MAX),
                output: None,
            },
        };
        match run(args).unwrap_err() {
            CliError::Core(e) => assert!(e.is_param_err()),
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let s = resolve_settings(None, None, None, None).unwrap();
        assert_eq!(s, BollSettings::default());
    }

    #[test]
    fn test_resolve_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"length": 10, "fill_opacity": 50}"#).unwrap();

        let s = resolve_settings(Some(&path), None, Some(1.0), Some(-1)).unwrap();
        assert_eq!(s.inputs.length, 10);
        assert_eq!(s.inputs.std_dev_multiplier, 1.0);
        assert_eq!(s.inputs.offset, -1);
        assert_eq!(s.style.fill.opacity, 50);
    }

    #[test]
    fn test_resolve_rejects_zero_length() {
        let err = resolve_settings(None, Some(0), None, None).unwrap_err();
        match err {
            CliError::Core(e) => assert!(e.is_param_err()),
            other => panic!("unexpected error {}", other),
        }
    }
}
