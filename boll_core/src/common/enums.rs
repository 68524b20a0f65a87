use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Stroke style of a band line
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

impl LineStyle {
    /// Dash pattern (segment, gap) handed to the renderer, `None` for solid strokes
    pub fn dash_pattern(&self) -> Option<[u8; 2]> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some([2, 2]),
        }
    }
}

/// The three drawn bands, in figure order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Upper,
    Mid,
    Lower,
}

/// Moving average used for the mid band
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum MaType {
    #[default]
    #[strum(serialize = "SMA")]
    #[serde(rename = "SMA")]
    Sma,
}

/// Bar field the window is taken over
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    #[default]
    Close,
}

/// Output encodings understood by writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}
