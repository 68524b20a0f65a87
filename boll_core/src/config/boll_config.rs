use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::common::{
    boll_exception::{BollError, ErrCode},
    enums::{BandKind, LineStyle, MaType, PriceSource},
    utils::{is_hex_color, json_to_i64},
};
use crate::config::ConfigWithCheck;

pub const DEFAULT_LENGTH: i64 = 20;
pub const DEFAULT_STD_DEV: f64 = 2.0;
pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_FILL_OPACITY: u8 = 20;

pub const MID_COLOR: &str = "#FF9800";
pub const UPPER_COLOR: &str = "#26A69A";
pub const LOWER_COLOR: &str = "#F4511E";

pub const MIN_LINE_WIDTH: u8 = 1;
pub const MAX_LINE_WIDTH: u8 = 3;

/// Numeric inputs of the indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorInputs {
    /// Window size in bars, must be >= 1
    #[serde(deserialize_with = "de_whole_i64")]
    pub length: i64,
    #[serde(default)]
    pub ma_type: MaType,
    #[serde(default)]
    pub source: PriceSource,
    /// Band distance from mid in standard deviations, must be >= 0
    #[serde(rename = "stdDev")]
    pub std_dev_multiplier: f64,
    /// Shift applied before the window is chosen; positive values look back
    #[serde(default, deserialize_with = "de_whole_i64")]
    pub offset: i64,
}

impl IndicatorInputs {
    pub fn new(length: i64, std_dev_multiplier: f64, offset: i64) -> Self {
        Self {
            length,
            ma_type: MaType::Sma,
            source: PriceSource::Close,
            std_dev_multiplier,
            offset,
        }
    }

    pub fn validate(&self) -> Result<(), BollError> {
        if self.length < 1 {
            return Err(BollError::para(format!(
                "length must be >= 1, got {}",
                self.length
            )));
        }
        if !self.std_dev_multiplier.is_finite() || self.std_dev_multiplier < 0.0 {
            return Err(BollError::para(format!(
                "stdDev multiplier must be a finite value >= 0, got {}",
                self.std_dev_multiplier
            )));
        }
        Ok(())
    }
}

impl Default for IndicatorInputs {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH, DEFAULT_STD_DEV, DEFAULT_OFFSET)
    }
}

/// Drawing style of one band line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyleSpec {
    pub visible: bool,
    pub color: String,
    #[serde(deserialize_with = "de_whole_u8")]
    pub width: u8,
    #[serde(rename = "style")]
    pub line_style: LineStyle,
}

impl LineStyleSpec {
    pub fn new(color: &str) -> Self {
        Self {
            visible: true,
            color: color.to_string(),
            width: MIN_LINE_WIDTH,
            line_style: LineStyle::Solid,
        }
    }
}

/// Area between upper and lower band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSpec {
    pub visible: bool,
    /// 0..=100
    #[serde(deserialize_with = "de_whole_u8")]
    pub opacity: u8,
}

impl Default for FillSpec {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub mid: LineStyleSpec,
    pub upper: LineStyleSpec,
    pub lower: LineStyleSpec,
    pub fill: FillSpec,
}

impl StyleSpec {
    pub fn band(&self, kind: BandKind) -> &LineStyleSpec {
        match kind {
            BandKind::Upper => &self.upper,
            BandKind::Mid => &self.mid,
            BandKind::Lower => &self.lower,
        }
    }

    fn band_mut(&mut self, kind: BandKind) -> &mut LineStyleSpec {
        match kind {
            BandKind::Upper => &mut self.upper,
            BandKind::Mid => &mut self.mid,
            BandKind::Lower => &mut self.lower,
        }
    }

    pub fn validate(&self) -> Result<(), BollError> {
        for kind in [BandKind::Upper, BandKind::Mid, BandKind::Lower] {
            let band = self.band(kind);
            if !(MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&band.width) {
                return Err(BollError::new(
                    format!(
                        "{} width must be in {}..={}, got {}",
                        kind, MIN_LINE_WIDTH, MAX_LINE_WIDTH, band.width
                    ),
                    ErrCode::ConfigError,
                ));
            }
            if !is_hex_color(&band.color) {
                return Err(BollError::new(
                    format!("{} color must be #RRGGBB, got {}", kind, band.color),
                    ErrCode::ConfigError,
                ));
            }
        }
        if self.fill.opacity > 100 {
            return Err(BollError::new(
                format!("fill opacity must be in 0..=100, got {}", self.fill.opacity),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            mid: LineStyleSpec::new(MID_COLOR),
            upper: LineStyleSpec::new(UPPER_COLOR),
            lower: LineStyleSpec::new(LOWER_COLOR),
            fill: FillSpec::default(),
        }
    }
}

/// Complete indicator settings. Updates replace the whole value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BollSettings {
    pub inputs: IndicatorInputs,
    pub style: StyleSpec,
}

impl BollSettings {
    pub fn validate(&self) -> Result<(), BollError> {
        self.inputs.validate()?;
        self.style.validate()
    }

    /// Parse settings from JSON.
    ///
    /// Accepts either the nested `{"inputs": .., "style": ..}` document or a
    /// flat object of override keys (see [`BollSettings::from_map`]).
    pub fn from_json_str(s: &str) -> Result<Self, BollError> {
        let value: serde_json::Value = serde_json::from_str(s).map_err(|e| {
            BollError::new(format!("invalid settings json: {}", e), ErrCode::ConfigError)
        })?;
        let obj = match value {
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(BollError::new(
                    format!("settings must be a json object, got {}", other),
                    ErrCode::ConfigError,
                ))
            }
        };

        if obj.contains_key("inputs") || obj.contains_key("style") {
            let mut conf = ConfigWithCheck::new(obj.into_iter().collect());
            let mut settings = Self::default();
            if let Some(v) = conf.take("inputs") {
                settings.inputs = serde_json::from_value(v)
                    .map_err(|e| BollError::para(format!("invalid inputs: {}", e)))?;
            }
            if let Some(v) = conf.take("style") {
                settings.style = serde_json::from_value(v).map_err(|e| {
                    BollError::new(format!("invalid style: {}", e), ErrCode::ConfigError)
                })?;
            }
            conf.check()?;
            settings.validate()?;
            Ok(settings)
        } else {
            Self::from_map(obj.into_iter().collect())
        }
    }

    /// Build settings from flat keys layered over the defaults.
    ///
    /// Keys: `length`, `std_dev`, `offset`, `ma_type`, `source`,
    /// `{mid,upper,lower}_{visible,color,width,style}`, `fill_visible`,
    /// `fill_opacity`. Unknown keys are rejected.
    pub fn from_map(conf: HashMap<String, serde_json::Value>) -> Result<Self, BollError> {
        let mut settings = Self::default();
        settings.apply_map(conf)?;
        Ok(settings)
    }

    /// Layer flat keys over the current values and re-validate.
    pub fn apply_map(&mut self, conf: HashMap<String, serde_json::Value>) -> Result<(), BollError> {
        let mut conf = ConfigWithCheck::new(conf);

        if let Some(v) = conf.take("length") {
            self.inputs.length = json_to_i64("length", &v)?;
        }
        if let Some(v) = conf.take("std_dev") {
            self.inputs.std_dev_multiplier = v.as_f64().ok_or_else(|| {
                BollError::para(format!("std_dev must be a number, got {}", v))
            })?;
        }
        if let Some(v) = conf.take("offset") {
            self.inputs.offset = json_to_i64("offset", &v)?;
        }
        if let Some(v) = conf.take("ma_type") {
            self.inputs.ma_type = parse_enum("ma_type", &v, ErrCode::ParaError)?;
        }
        if let Some(v) = conf.take("source") {
            self.inputs.source = parse_enum("source", &v, ErrCode::ParaError)?;
        }

        // style keys fail with ConfigError, same as the nested document
        let code = ErrCode::ConfigError;
        for kind in [BandKind::Upper, BandKind::Mid, BandKind::Lower] {
            let band = self.style.band_mut(kind);
            if let Some(v) = conf.take(&format!("{}_visible", kind)) {
                band.visible = parse_bool(&format!("{}_visible", kind), &v, code)?;
            }
            if let Some(v) = conf.take(&format!("{}_color", kind)) {
                band.color = parse_string(&format!("{}_color", kind), &v, code)?;
            }
            if let Some(v) = conf.take(&format!("{}_width", kind)) {
                band.width = parse_u8(&format!("{}_width", kind), &v, code)?;
            }
            if let Some(v) = conf.take(&format!("{}_style", kind)) {
                band.line_style = parse_enum(&format!("{}_style", kind), &v, code)?;
            }
        }

        if let Some(v) = conf.take("fill_visible") {
            self.style.fill.visible = parse_bool("fill_visible", &v, code)?;
        }
        if let Some(v) = conf.take("fill_opacity") {
            self.style.fill.opacity = parse_u8("fill_opacity", &v, code)?;
        }

        conf.check()?;
        self.validate()
    }
}

fn parse_bool(key: &str, v: &serde_json::Value, code: ErrCode) -> Result<bool, BollError> {
    v.as_bool()
        .ok_or_else(|| BollError::new(format!("{} must be a bool, got {}", key, v), code))
}

fn parse_string(key: &str, v: &serde_json::Value, code: ErrCode) -> Result<String, BollError> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| BollError::new(format!("{} must be a string, got {}", key, v), code))
}

fn parse_u8(key: &str, v: &serde_json::Value, code: ErrCode) -> Result<u8, BollError> {
    let n = json_to_i64(key, v).map_err(|e| BollError::new(e.msg, code))?;
    u8::try_from(n).map_err(|_| BollError::new(format!("{} out of range: {}", key, n), code))
}

fn parse_enum<T: std::str::FromStr>(
    key: &str,
    v: &serde_json::Value,
    code: ErrCode,
) -> Result<T, BollError> {
    let s = parse_string(key, v, code)?;
    s.parse::<T>()
        .map_err(|_| BollError::new(format!("unknown {}={}", key, s), code))
}

/// Integer field that also accepts whole floats such as `20.0`
fn de_whole_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    json_to_i64("value", &v).map_err(|e| de::Error::custom(e.msg))
}

fn de_whole_u8<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let n = de_whole_i64(d)?;
    u8::try_from(n).map_err(|_| de::Error::custom(format!("value out of range: {}", n)))
}
