pub mod common;
pub mod config;
pub mod kline;
pub mod math;
pub mod plot;

pub use common::boll_exception::{BollError, ErrCode};
pub use config::boll_config::{BollSettings, IndicatorInputs, StyleSpec};
pub use kline::price_bar::PriceBar;
pub use math::boll::{compute, BandPoint, BollModel};
pub use plot::plot_series::{build_render_plan, RenderPlan};
