//! Seeded random-walk OHLCV data for fixtures and demos.
//!
//! Each bar opens at the previous close, the close moves by up to one unit
//! either way, and the wicks extend up to one unit past the body. The same
//! seed always produces the same sequence.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::boll_exception::BollError;
use crate::kline::price_bar::PriceBar;

/// Close price of the bar before the first generated one
pub const START_PRICE: f64 = 100.0;

/// Spacing between generated bars (one minute)
pub const BAR_INTERVAL_MS: i64 = 60 * 1000;

/// Fails with `ParaError` when the last timestamp would not fit in an `i64`.
pub fn generate_ohlcv(
    count: usize,
    start_ms: i64,
    seed: u64,
) -> Result<Vec<PriceBar>, BollError> {
    if count > 0 {
        let last_offset = i64::try_from(count - 1)
            .ok()
            .and_then(|n| n.checked_mul(BAR_INTERVAL_MS));
        if last_offset.and_then(|d| start_ms.checked_add(d)).is_none() {
            return Err(BollError::para(format!(
                "{} bars from start_ms={} overflow the timestamp range",
                count, start_ms
            )));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bars = Vec::with_capacity(count);
    let mut close = START_PRICE;

    for i in 0..count {
        let open = close;
        close += rng.gen_range(-1.0..1.0);
        let high = open.max(close) + rng.gen_range(0.0..1.0);
        let low = open.min(close) - rng.gen_range(0.0..1.0);
        let volume = rng.gen_range(100.0..1100.0);

        bars.push(PriceBar {
            timestamp: start_ms + i as i64 * BAR_INTERVAL_MS,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kline::price_bar::check_monotonic;

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(generate_ohlcv(50, 0, 42).unwrap(), generate_ohlcv(50, 0, 42).unwrap());
        assert_ne!(generate_ohlcv(50, 0, 42).unwrap(), generate_ohlcv(50, 0, 43).unwrap());
    }

    #[test]
    fn test_ohlc_invariants() {
        let bars = generate_ohlcv(300, 1_700_000_000_000, 7).unwrap();
        assert_eq!(bars.len(), 300);
        assert_eq!(bars[0].open, START_PRICE);
        for bar in &bars {
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.open.min(bar.close));
            assert!((100.0..1100.0).contains(&bar.volume));
        }
        for pair in bars.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!(pair[1].timestamp - pair[0].timestamp, BAR_INTERVAL_MS);
        }
        assert!(check_monotonic(&bars).is_ok());
    }

    #[test]
    fn test_empty() {
        assert!(generate_ohlcv(0, 0, 1).unwrap().is_empty());
        assert!(generate_ohlcv(0, i64::MAX, 1).unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_overflow_rejected() {
        assert!(generate_ohlcv(2, i64::MAX, 1).unwrap_err().is_param_err());
        assert!(generate_ohlcv(usize::MAX, 0, 1).unwrap_err().is_param_err());

        let bars = generate_ohlcv(1, i64::MAX, 1).unwrap();
        assert_eq!(bars[0].timestamp, i64::MAX);
        let bars = generate_ohlcv(2, i64::MAX - BAR_INTERVAL_MS, 1).unwrap();
        assert_eq!(bars[1].timestamp, i64::MAX);
    }
}
