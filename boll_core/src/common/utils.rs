use crate::common::boll_exception::{BollError, ErrCode};

/// Tolerance used when comparing band values
pub const BAND_EPSILON: f64 = 1e-9;

/// Check if two floats are equal within `eps`
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Check if a string is a `#RRGGBB` color
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Convert a 0..=100 opacity percentage to an alpha channel value
pub fn opacity_to_alpha(opacity: u8) -> f64 {
    f64::from(opacity.min(100)) / 100.0
}

/// Convert an integral JSON value, rejecting fractional numbers
pub fn json_to_i64(key: &str, v: &serde_json::Value) -> Result<i64, BollError> {
    match v.as_i64() {
        Some(n) => Ok(n),
        None => match v.as_f64() {
            Some(f) if f.fract() == 0.0 && f.is_finite() => {
                // i64::MAX as f64 rounds up to 2^63, which is already out of range
                if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Ok(f as i64)
                } else {
                    Err(BollError::new(
                        format!("{} out of range, got {}", key, f),
                        ErrCode::ParaError,
                    ))
                }
            }
            Some(f) => Err(BollError::new(
                format!("{} must be an integer, got {}", key, f),
                ErrCode::ParaError,
            )),
            None => Err(BollError::new(
                format!("{} must be a number, got {}", key, v),
                ErrCode::ParaError,
            )),
        },
    }
}
