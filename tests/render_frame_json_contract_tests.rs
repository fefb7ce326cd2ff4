use chrono::NaiveDate;
use sp500_charts::api::{HistoricalChart, HistoricalChartConfig, RENDER_FRAME_JSON_SCHEMA_V1};
use sp500_charts::core::{PricePoint, Viewport};
use sp500_charts::render::{Color, LinePrimitive, RenderFrame};

fn chart_frame() -> RenderFrame {
    let series = vec![
        PricePoint::new(NaiveDate::from_ymd_opt(2019, 1, 1).expect("date"), 2506.85),
        PricePoint::new(NaiveDate::from_ymd_opt(2020, 2, 29).expect("date"), 2954.22),
    ];
    HistoricalChart::new(HistoricalChartConfig::default(), series)
        .expect("chart")
        .build_frame()
        .expect("frame")
}

#[test]
fn contract_v1_carries_schema_version() {
    let json = chart_frame().to_json_contract_v1_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["schema_version"], RENDER_FRAME_JSON_SCHEMA_V1);
    assert_eq!(value["frame"]["viewport"]["width"], 920);
}

#[test]
fn both_payload_shapes_load_back() {
    let frame = chart_frame();
    let bare = RenderFrame::from_json_compat_str(&frame.to_json_pretty().expect("json")).expect("bare");
    let versioned = RenderFrame::from_json_compat_str(
        &frame.to_json_contract_v1_pretty().expect("json"),
    )
    .expect("versioned");
    for loaded in [&bare, &versioned] {
        assert_eq!(loaded.viewport, frame.viewport);
        assert_eq!(loaded.rects.len(), frame.rects.len());
        assert_eq!(loaded.lines.len(), frame.lines.len());
        assert_eq!(loaded.polylines.len(), frame.polylines.len());
        let texts = |f: &RenderFrame| f.texts.iter().map(|t| t.text.clone()).collect::<Vec<_>>();
        assert_eq!(texts(loaded), texts(&frame));
    }
}

#[test]
fn unknown_schema_version_is_rejected() {
    let json = serde_json::json!({
        "schema_version": 99,
        "frame": RenderFrame::new(Viewport::new(10, 10)),
    })
    .to_string();
    assert!(RenderFrame::from_json_compat_str(&json).is_err());
}

#[test]
fn older_frames_without_optional_lists_still_parse() {
    let line = LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, Color::BLACK);
    let json = serde_json::json!({
        "viewport": { "width": 10, "height": 10 },
        "rects": [],
        "lines": [line],
        "texts": [],
    })
    .to_string();
    let frame = RenderFrame::from_json_compat_str(&json).expect("frame");
    assert_eq!(frame.lines.len(), 1);
    assert!(frame.gradients.is_empty() && frame.circles.is_empty());
}

#[test]
fn garbage_is_rejected() {
    assert!(RenderFrame::from_json_compat_str("{ not json").is_err());
}
