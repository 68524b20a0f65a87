//! Writers for band and bar output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use boll_core::{BandPoint, BollSettings, PriceBar, RenderPlan};
use serde::Serialize;

use crate::error::{CliError, Result};

/// File writer when a path is given, stdout otherwise
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).map_err(|e| CliError::io(p, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn cell(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// `timestamp,upper,mid,lower`, empty cells where a band is absent
pub fn write_bands_csv<W: Write>(w: W, bars: &[PriceBar], points: &[BandPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["timestamp", "upper", "mid", "lower"])?;
    for (bar, p) in bars.iter().zip(points) {
        wtr.write_record([
            bar.timestamp.to_string(),
            cell(p.upper),
            cell(p.mid),
            cell(p.lower),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_bars_csv<W: Write>(w: W, bars: &[PriceBar]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    for bar in bars {
        wtr.serialize(bar)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct BandReport<'a> {
    settings: &'a BollSettings,
    timestamps: Vec<i64>,
    points: &'a [BandPoint],
    plan: &'a RenderPlan,
}

pub fn write_bands_json<W: Write>(
    mut w: W,
    settings: &BollSettings,
    bars: &[PriceBar],
    points: &[BandPoint],
    plan: &RenderPlan,
) -> Result<()> {
    let report = BandReport {
        settings,
        timestamps: bars.iter().map(|b| b.timestamp).collect(),
        points,
        plan,
    };
    serde_json::to_writer_pretty(&mut w, &report)?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boll_core::{build_render_plan, compute, IndicatorInputs};

    fn bars() -> Vec<PriceBar> {
        [1.0, 2.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::from_close(i as i64 * 1000, c))
            .collect()
    }

    #[test]
    fn test_bands_csv_leaves_absent_cells_empty() {
        let bars = bars();
        let points = compute(&bars, &IndicatorInputs::new(2, 0.0, 0)).unwrap();
        let mut buf = Vec::new();
        write_bands_csv(&mut buf, &bars, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "timestamp,upper,mid,lower\n0,,,\n1000,1.5,1.5,1.5\n2000,2.5,2.5,2.5\n"
        );
    }

    #[test]
    fn test_bars_csv_header() {
        let mut buf = Vec::new();
        write_bars_csv(&mut buf, &bars()[..1]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "timestamp,open,high,low,close,volume\n0,1.0,1.0,1.0,1.0,0.0\n");
    }

    #[test]
    fn test_json_report() {
        let bars = bars();
        let settings = BollSettings::default();
        let points = compute(&bars, &IndicatorInputs::new(2, 1.0, 0)).unwrap();
        let plan = build_render_plan(&points, &settings.style).unwrap();
        let mut buf = Vec::new();
        write_bands_json(&mut buf, &settings, &bars, &points, &plan).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["timestamps"], serde_json::json!([0, 1000, 2000]));
        assert_eq!(v["points"][0], serde_json::json!({}));
        assert_eq!(v["points"][1]["mid"], serde_json::json!(1.5));
        assert_eq!(v["plan"]["lines"].as_array().unwrap().len(), 3);
    }
}
