//! Bollinger Bands over a close-price window.
//!
//! For output index `i` the window ends at `i - offset`. Points whose window
//! would start before the first bar or end outside the series are empty.
//! The deviation is the population standard deviation (divisor `length`).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use crate::common::boll_exception::BollError;
use crate::config::boll_config::IndicatorInputs;
use crate::kline::price_bar::PriceBar;

/// Fully populated band values for one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollMetric {
    pub upper: f64,
    pub mid: f64,
    pub lower: f64,
}

impl BollMetric {
    /// Sums run newest to oldest
    fn from_window<'a>(
        window: impl DoubleEndedIterator<Item = &'a f64> + Clone,
        len: usize,
        k: f64,
    ) -> Self {
        let n = len as f64;
        let mid = window.clone().rev().sum::<f64>() / n;
        let variance = window.rev().map(|&x| (x - mid).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        Self {
            upper: mid + k * std_dev,
            mid,
            lower: mid - k * std_dev,
        }
    }
}

/// Band values at one output index. All fields are `None` when the point has
/// no window; callers must not draw such points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
}

impl BandPoint {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_none() && self.mid.is_none() && self.lower.is_none()
    }
}

impl From<BollMetric> for BandPoint {
    fn from(m: BollMetric) -> Self {
        Self {
            upper: Some(m.upper),
            mid: Some(m.mid),
            lower: Some(m.lower),
        }
    }
}

/// Compute the bands for every bar, index-aligned with `bars`.
///
/// Fails with `ParaError` before touching the data if `inputs` is invalid.
pub fn compute(bars: &[PriceBar], inputs: &IndicatorInputs) -> Result<Vec<BandPoint>, BollError> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    compute_closes(&closes, inputs)
}

/// Same as [`compute`] over a bare close series.
pub fn compute_closes(closes: &[f64], inputs: &IndicatorInputs) -> Result<Vec<BandPoint>, BollError> {
    inputs.validate()?;

    let length = inputs.length;
    let k = inputs.std_dev_multiplier;
    let n = closes.len() as i64;

    debug!(
        bars = closes.len(),
        length,
        std_dev = k,
        offset = inputs.offset,
        "computing bollinger bands"
    );

    let points = (0..n)
        .map(|i| {
            let compute_index = i.saturating_sub(inputs.offset);
            if compute_index < length - 1 || compute_index < 0 || compute_index >= n {
                return BandPoint::empty();
            }
            let end = compute_index as usize;
            let start = end + 1 - length as usize;
            let window = &closes[start..=end];
            BollMetric::from_window(window.iter(), window.len(), k).into()
        })
        .collect();

    Ok(points)
}

const MAX_PREALLOC: usize = 1024;

/// Incremental form: feed closes one at a time.
///
/// With `offset = 0` the metric returned after the `i`-th close equals the
/// point `compute` produces at index `i`.
#[derive(Debug)]
pub struct BollModel {
    period: usize,
    k: f64,
    prices: VecDeque<f64>,
}

impl BollModel {
    pub fn new(inputs: &IndicatorInputs) -> Result<Self, BollError> {
        inputs.validate()?;
        let period = inputs.length as usize;
        Ok(Self {
            period,
            k: inputs.std_dev_multiplier,
            prices: VecDeque::with_capacity(period.min(MAX_PREALLOC)),
        })
    }

    pub fn add(&mut self, price: f64) -> Option<BollMetric> {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }
        if self.prices.len() < self.period {
            return None;
        }
        Some(BollMetric::from_window(
            self.prices.iter(),
            self.period,
            self.k,
        ))
    }

    pub fn reset(&mut self) {
        self.prices.clear();
    }
}
