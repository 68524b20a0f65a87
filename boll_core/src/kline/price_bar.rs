use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::boll_exception::{BollError, ErrCode};

/// One candlestick. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        autofix: bool,
    ) -> Result<Self, BollError> {
        let mut bar = Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        };
        bar.check(autofix)?;
        Ok(bar)
    }

    /// Bar carrying only a close price, all other prices equal to it
    pub fn from_close(timestamp: i64, close: f64) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    pub fn time_str(&self) -> String {
        match DateTime::<Utc>::from_timestamp_millis(self.timestamp) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.timestamp.to_string(),
        }
    }

    fn check(&mut self, autofix: bool) -> Result<(), BollError> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(BollError::new(
                format!("{} has non-finite price in {}", self.time_str(), self),
                ErrCode::KlDataInvalid,
            ));
        }

        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if autofix {
                self.low = min_price;
            } else {
                return Err(BollError::new(
                    format!(
                        "{} low price={} is not min of {}",
                        self.time_str(),
                        self.low,
                        self
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }

        if self.high < max_price {
            if autofix {
                self.high = max_price;
            } else {
                return Err(BollError::new(
                    format!(
                        "{} high price={} is not max of {}",
                        self.time_str(),
                        self.high,
                        self
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PriceBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[low={}, open={}, high={}, close={}]",
            self.low, self.open, self.high, self.close
        )
    }
}

/// Verify bars are strictly ascending by timestamp.
///
/// The calculator itself never calls this; loaders that want the ordering
/// guarantee enforced do.
pub fn check_monotonic(bars: &[PriceBar]) -> Result<(), BollError> {
    for pair in bars.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(BollError::new(
                format!(
                    "bar at {} is not after {}",
                    pair[1].time_str(),
                    pair[0].time_str()
                ),
                ErrCode::KlNotMonotonous,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bar() {
        let bar = PriceBar::new(0, 10.0, 12.0, 9.0, 11.0, 100.0, false).unwrap();
        assert_eq!(bar.high, 12.0);
        assert_eq!(bar.low, 9.0);
    }

    #[test]
    fn test_low_not_min_rejected() {
        let err = PriceBar::new(0, 10.0, 12.0, 10.5, 11.0, 100.0, false).unwrap_err();
        assert_eq!(err.errcode, ErrCode::KlDataInvalid);
        assert!(err.msg.contains("low price=10.5"));
    }

    #[test]
    fn test_autofix_repairs_high_and_low() {
        let bar = PriceBar::new(0, 10.0, 10.5, 10.5, 11.0, 100.0, true).unwrap();
        assert_eq!(bar.low, 10.0);
        assert_eq!(bar.high, 11.0);
    }

    #[test]
    fn test_nan_rejected_even_with_autofix() {
        assert!(PriceBar::new(0, f64::NAN, 1.0, 1.0, 1.0, 0.0, true).is_err());
    }

    #[test]
    fn test_time_str() {
        let bar = PriceBar::from_close(1_700_000_000_000, 1.0);
        assert_eq!(bar.time_str(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_check_monotonic() {
        let bars = vec![
            PriceBar::from_close(1_000, 1.0),
            PriceBar::from_close(2_000, 1.0),
        ];
        assert!(check_monotonic(&bars).is_ok());
        assert!(check_monotonic(&[]).is_ok());

        let dup = vec![bars[0], bars[0]];
        let err = check_monotonic(&dup).unwrap_err();
        assert_eq!(err.errcode, ErrCode::KlNotMonotonous);
    }
}
