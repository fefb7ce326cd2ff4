use chrono::NaiveDate;
use sp500_charts::api::{HistoricalChart, HistoricalChartConfig};
use sp500_charts::core::{PricePoint, Viewport};
use sp500_charts::interaction::PointerEvent;
use sp500_charts::layout::{CURVE_SAMPLES_PER_SEGMENT, LineCurve};
use sp500_charts::render::{LineStrokeStyle, NullRenderer, Renderer};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn series() -> Vec<PricePoint> {
    vec![
        PricePoint::new(ymd(2020, 2, 29), 2954.22),
        PricePoint::new(ymd(1979, 12, 31), 107.94),
        PricePoint::new(ymd(1980, 1, 31), 114.16),
        PricePoint::new(ymd(2000, 7, 31), 1430.83),
        PricePoint::new(ymd(2003, 1, 31), 855.70),
        PricePoint::new(ymd(2009, 1, 31), 825.88),
        PricePoint::new(ymd(2023, 6, 30), 4450.38),
    ]
}

fn chart() -> HistoricalChart {
    HistoricalChart::new(HistoricalChartConfig::default(), series()).expect("chart")
}

fn surface_point(chart: &HistoricalChart, index: usize) -> PointerEvent {
    let projected = chart.projected()[index];
    let (x, y) = chart.config().plot_area().to_surface(projected.x, projected.y);
    PointerEvent::new(x, y)
}

#[test]
fn series_is_normalized_on_construction() {
    let chart = chart();
    let dates: Vec<NaiveDate> = chart.series().iter().map(|point| point.date).collect();
    assert_eq!(dates.first(), Some(&ymd(1980, 1, 31)));
    assert_eq!(dates.last(), Some(&ymd(2023, 6, 30)));
    assert_eq!(dates.len(), 6);
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn value_axis_tops_out_at_max_plus_headroom() {
    let chart = chart();
    let (_, top) = chart.layout().value_scale().domain();
    assert!((top - 4950.38).abs() < 1e-9);
}

#[test]
fn only_events_present_in_series_are_annotated() {
    let chart = chart();
    let mut ids: Vec<&str> = chart.annotations().iter().map(|note| note.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["covid", "dotcom-burst", "dotcom-peak", "gfc"]);
    assert!(chart.annotations().iter().all(|note| note.label.is_empty()));
}

#[test]
fn hover_snaps_to_point_and_fills_tooltip() {
    let mut chart = chart();
    let index = chart.series().iter().position(|point| point.date == ymd(2020, 2, 29)).expect("covid");

    let event = surface_point(&chart, index);
    assert_eq!(chart.pointer_move(event), Some(index));

    let hover = chart.hover();
    assert!(hover.visible);
    assert_eq!(hover.index, Some(index));

    let tooltip = chart.tooltip();
    assert!(tooltip.is_visible());
    let lines: Vec<&str> = tooltip.lines().iter().map(|line| line.text.as_str()).collect();
    assert_eq!(lines, vec!["Sat Feb 29 2020", "2954.22"]);
    assert_eq!(
        tooltip.position(),
        (event.x + 50.0, event.y - 50.0)
    );
}

#[test]
fn hover_between_points_picks_the_later_one() {
    let mut chart = chart();
    let first = surface_point(&chart, 0);
    let second = surface_point(&chart, 1);
    let between = PointerEvent::new(first.x + (second.x - first.x) * 0.1, 200.0);

    assert_eq!(chart.pointer_move(between), Some(1));
}

#[test]
fn pointer_outside_plot_hides_hover() {
    let mut chart = chart();
    chart.pointer_move(surface_point(&chart, 2));
    assert!(chart.tooltip().is_visible());

    assert_eq!(chart.pointer_move(PointerEvent::new(5.0, 5.0)), None);
    assert!(!chart.tooltip().is_visible());
    assert!(!chart.hover().visible);
}

#[test]
fn non_finite_pointer_hides_focus_and_tooltip() {
    let mut chart = chart();
    chart.pointer_move(surface_point(&chart, 3));
    assert!(chart.hover().visible);

    assert_eq!(chart.pointer_move(PointerEvent::new(f64::NAN, 100.0)), None);
    assert!(!chart.hover().visible);
    assert!(!chart.tooltip().is_visible());
    assert!(chart.build_frame().expect("frame").circles.is_empty());
}

#[test]
fn one_tooltip_across_many_moves() {
    let mut chart = chart();
    for index in 0..chart.series().len() {
        chart.pointer_move(surface_point(&chart, index));
    }
    let frame = chart.build_frame().expect("frame");
    assert_eq!(frame.rects.len(), 1, "exactly one tooltip box");
    assert_eq!(frame.circles.len(), 1, "exactly one focus marker");

    chart.pointer_leave();
    let frame = chart.build_frame().expect("frame");
    assert!(frame.rects.is_empty());
    assert!(frame.circles.is_empty());
}

#[test]
fn frame_has_line_grid_axes_and_titles() {
    let chart = chart();
    let frame = chart.build_frame().expect("frame");
    frame.validate().expect("valid");

    assert_eq!(frame.viewport, Viewport::new(920, 600));
    assert_eq!(frame.polylines.len(), 1);
    assert_eq!(
        frame.polylines[0].points.len(),
        1 + (chart.series().len() - 1) * CURVE_SAMPLES_PER_SEGMENT
    );
    assert!(frame.dotted_line_count() > 0);
    assert!(
        frame
            .lines
            .iter()
            .filter(|line| line.stroke_style == LineStrokeStyle::Dotted)
            .all(|line| line.color.to_hex() == "#4e4e4e")
    );
    assert!(frame.texts.iter().any(|text| text.text == "S&P 500 Index Historical Chart"));
    assert!(frame.texts.iter().any(|text| text.text == "COVID-19 Pandemic"));
    assert!(frame.texts.iter().any(|text| text.text == "2020"));
}

#[test]
fn render_hands_frame_to_backend() {
    let chart = chart();
    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_text_count > 0);

    let frame = chart.build_frame().expect("frame");
    renderer.render(&frame).expect("render again");
    assert_eq!(renderer.frames_rendered, 2);
}

#[test]
fn empty_series_still_builds_a_valid_frame() {
    let chart = HistoricalChart::new(HistoricalChartConfig::default(), Vec::new()).expect("chart");
    let frame = chart.build_frame().expect("frame");
    frame.validate().expect("valid");
    assert!(frame.polylines.is_empty());
    assert!(chart.annotations().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let config = HistoricalChartConfig {
        line_color: "teal".to_owned(),
        ..HistoricalChartConfig::default()
    };
    assert!(HistoricalChart::new(config, series()).is_err());
}

#[test]
fn line_passes_through_every_sample() {
    let chart = chart();
    let frame = chart.build_frame().expect("frame");
    let line = &frame.polylines[0].points;
    let area = chart.config().plot_area();

    for (index, point) in chart.projected().iter().enumerate() {
        let (x, y) = area.to_surface(point.x, point.y);
        let (lx, ly) = line[index * CURVE_SAMPLES_PER_SEGMENT];
        assert!((lx - x).abs() < 1e-9 && (ly - y).abs() < 1e-9);
    }
}

#[test]
fn linear_curve_draws_straight_segments() {
    let config = HistoricalChartConfig {
        curve: LineCurve::Linear,
        ..HistoricalChartConfig::default()
    };
    let chart = HistoricalChart::new(config, series()).expect("chart");
    let frame = chart.build_frame().expect("frame");
    assert_eq!(frame.polylines[0].points.len(), chart.series().len());
}
