use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::common::{
    boll_exception::BollError,
    enums::{BandKind, LineStyle},
    utils::opacity_to_alpha,
};
use crate::config::boll_config::StyleSpec;
use crate::math::boll::BandPoint;
use crate::plot::color::Rgba;

/// One band line, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub kind: BandKind,
    pub color: Rgba,
    pub width: u8,
    pub line_style: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<[u8; 2]>,
    pub values: Vec<Option<f64>>,
}

/// Shaded area between upper and lower band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillArea {
    pub color: Rgba,
    /// `(upper, lower)` per bar, `None` where either band is absent
    pub values: Vec<Option<(f64, f64)>>,
}

/// Everything a chart needs to draw the indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Upper, mid, lower
    pub lines: Vec<LineSeries>,
    pub fill: FillArea,
}

impl RenderPlan {
    pub fn line(&self, kind: BandKind) -> Option<&LineSeries> {
        self.lines.iter().find(|l| l.kind == kind)
    }
}

fn band_value(point: &BandPoint, kind: BandKind) -> Option<f64> {
    match kind {
        BandKind::Upper => point.upper,
        BandKind::Mid => point.mid,
        BandKind::Lower => point.lower,
    }
}

/// Map band points and style onto draw series.
///
/// Hidden lines keep their values but get a transparent color. The fill uses
/// the upper band's color with alpha taken from the fill opacity.
pub fn build_render_plan(points: &[BandPoint], style: &StyleSpec) -> Result<RenderPlan, BollError> {
    let mut lines = Vec::with_capacity(3);
    for kind in BandKind::iter() {
        let band = style.band(kind);
        let color = if band.visible {
            Rgba::from_hex(&band.color)?
        } else {
            Rgba::TRANSPARENT
        };
        lines.push(LineSeries {
            kind,
            color,
            width: band.width,
            line_style: band.line_style,
            dash: band.line_style.dash_pattern(),
            values: points.iter().map(|p| band_value(p, kind)).collect(),
        });
    }

    let fill_color = if style.fill.visible {
        Rgba::from_hex(&style.upper.color)?.with_alpha(opacity_to_alpha(style.fill.opacity))
    } else {
        Rgba::TRANSPARENT
    };
    let fill = FillArea {
        color: fill_color,
        values: points
            .iter()
            .map(|p| match (p.upper, p.lower) {
                (Some(u), Some(l)) => Some((u, l)),
                _ => None,
            })
            .collect(),
    };

    Ok(RenderPlan { lines, fill })
}
