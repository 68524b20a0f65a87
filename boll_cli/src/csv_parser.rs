//! Reads bars from CSV.
//!
//! Expected header: `timestamp,open,high,low,close,volume`. The timestamp is
//! either integer milliseconds since the epoch, `%Y-%m-%d %H:%M:%S` or
//! `%Y-%m-%d` (both UTC).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use boll_core::kline::price_bar::check_monotonic;
use boll_core::{BollError, ErrCode, PriceBar};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub fn parse_timestamp(s: &str) -> std::result::Result<i64, BollError> {
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| {
            BollError::new(
                format!("unrecognised timestamp '{}'", s),
                ErrCode::SrcDataFormatError,
            )
        })
}

pub fn read_bars<R: Read>(reader: R, autofix: bool) -> Result<Vec<PriceBar>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (i, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let record = result?;
        // header is line 1
        let line = i as u64 + 2;
        let timestamp =
            parse_timestamp(&record.timestamp).map_err(|source| CliError::Parse { line, source })?;
        let bar = PriceBar::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
            autofix,
        )
        .map_err(|source| CliError::Parse { line, source })?;
        bars.push(bar);
    }

    debug!(bars = bars.len(), "parsed csv");
    Ok(bars)
}

/// Load bars from a file and require strictly ascending timestamps
pub fn load_bars(path: &Path, autofix: bool) -> Result<Vec<PriceBar>> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let bars = read_bars(file, autofix)?;
    check_monotonic(&bars)?;
    info!(path = %path.display(), bars = bars.len(), "loaded bars");
    Ok(bars)
}
