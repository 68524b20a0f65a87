//! End-to-end checks: generated bars through settings, calculator and render plan.

use boll_core::common::enums::BandKind;
use boll_core::kline::generator::generate_ohlcv;
use boll_core::math::boll::BollModel;
use boll_core::{build_render_plan, compute, BandPoint, BollSettings, ErrCode, IndicatorInputs};

#[test]
fn default_settings_over_generated_series() {
    let bars = generate_ohlcv(300, 1_700_000_000_000, 42).unwrap();
    let settings = BollSettings::default();
    let points = compute(&bars, &settings.inputs).unwrap();

    assert_eq!(points.len(), 300);
    assert_eq!(points.iter().filter(|p| p.is_empty()).count(), 19);
    for p in &points[19..] {
        assert!(p.upper.unwrap() > p.mid.unwrap() || p.upper == p.mid);
    }

    let plan = build_render_plan(&points, &settings.style).unwrap();
    assert_eq!(plan.lines.len(), 3);
    assert_eq!(plan.line(BandKind::Upper).unwrap().values.len(), 300);
    assert_eq!(plan.fill.values.iter().flatten().count(), 281);
}

#[test]
fn settings_change_recomputes_from_scratch() {
    let bars = generate_ohlcv(60, 0, 3).unwrap();
    let mut settings = BollSettings::default();
    let first = compute(&bars, &settings.inputs).unwrap();

    settings = BollSettings {
        inputs: IndicatorInputs::new(10, 1.0, 0),
        ..settings
    };
    let second = compute(&bars, &settings.inputs).unwrap();
    assert_eq!(second.iter().filter(|p| p.is_empty()).count(), 9);
    assert_ne!(first, second);

    // restoring the old inputs restores the old output
    settings.inputs = IndicatorInputs::default();
    assert_eq!(compute(&bars, &settings.inputs).unwrap(), first);
}

#[test]
fn streaming_model_agrees_with_batch() {
    let bars = generate_ohlcv(120, 0, 11).unwrap();
    let inputs = IndicatorInputs::new(20, 2.0, 0);
    let batch = compute(&bars, &inputs).unwrap();

    let mut model = BollModel::new(&inputs).unwrap();
    let streamed: Vec<BandPoint> = bars
        .iter()
        .map(|b| model.add(b.close).map(BandPoint::from).unwrap_or_default())
        .collect();
    assert_eq!(streamed, batch);
}

#[test]
fn invalid_settings_surface_as_errors() {
    let bars = generate_ohlcv(10, 0, 1).unwrap();
    let err = compute(&bars, &IndicatorInputs::new(0, 2.0, 0)).unwrap_err();
    assert_eq!(err.errcode, ErrCode::ParaError);

    let err = BollSettings::from_json_str(r#"{"std_dev": -1}"#).unwrap_err();
    assert_eq!(err.errcode, ErrCode::ParaError);
}
