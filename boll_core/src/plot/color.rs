use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{
    boll_exception::{BollError, ErrCode},
    utils::is_hex_color,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) ..= 1.0 (opaque)
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn from_hex(hex: &str) -> Result<Self, BollError> {
        if !is_hex_color(hex) {
            return Err(BollError::new(
                format!("color must be #RRGGBB, got {}", hex),
                ErrCode::PlotErr,
            ));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| BollError::new(format!("bad color {}: {}", hex, e), ErrCode::PlotErr))
        };
        Ok(Self {
            r: channel(1)?,
            g: channel(3)?,
            b: channel(5)?,
            a: 1.0,
        })
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
