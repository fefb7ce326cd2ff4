use chrono::NaiveDate;
use rust_decimal::Decimal;
use sp500_charts::core::{InvestmentPoint, PricePoint, Viewport};
use sp500_charts::extensions::{
    AnnotationSpec, AnnotationStyle, PlacedAnnotation, append_annotations, historical_events,
    investment_annotations, resolve_annotations,
};
use sp500_charts::layout::ProjectedPoint;
use sp500_charts::render::{RenderFrame, TextHAlign};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn project_price(point: &PricePoint) -> ProjectedPoint {
    ProjectedPoint {
        x: f64::from(chrono::Datelike::year(&point.date) - 2000),
        y: point.value,
    }
}

#[test]
fn historical_events_are_the_six_market_callouts() {
    let events = historical_events();
    let titles: Vec<&str> = events.iter().map(|spec| spec.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "COVID-19 Pandemic",
            "Global Financial Crisis",
            "Dotcom Bubble Peak",
            "Dotcom Bubble Burst",
            "Housing Market Boom",
            "Inflation, Ukraine Russia War",
        ]
    );
    assert!(events.iter().all(|spec| spec.label.is_empty()));
    assert_eq!(events[0].date, ymd(2020, 2, 29));
    assert_eq!((events[5].dx, events[5].dy), (20.0, 180.0));
}

#[test]
fn annotations_without_exact_match_are_omitted() {
    let series = vec![
        PricePoint::new(ymd(2009, 1, 31), 825.88),
        PricePoint::new(ymd(2015, 1, 31), 1994.99),
        PricePoint::new(ymd(2020, 2, 29), 2954.22),
    ];

    let placed = resolve_annotations(&historical_events(), &series, project_price);
    let ids: Vec<&str> = placed.iter().map(|note| note.id.as_str()).collect();
    assert_eq!(ids, vec!["covid", "gfc"]);

    let covid = &placed[0];
    assert_eq!((covid.anchor_x, covid.anchor_y), (20.0, 2954.22));
    assert_eq!(covid.note_point(), (20.0, 3054.22));
}

#[test]
fn near_miss_dates_do_not_anchor() {
    let series = vec![PricePoint::new(ymd(2020, 3, 1), 2954.22)];
    let specs = vec![AnnotationSpec::new("covid", ymd(2020, 2, 29), "COVID-19 Pandemic")];
    assert!(resolve_annotations(&specs, &series, project_price).is_empty());
}

#[test]
fn investment_callouts_mark_first_and_last_points() {
    let points = vec![
        InvestmentPoint {
            year: ymd(2009, 1, 1),
            value: Decimal::new(1000, 2),
        },
        InvestmentPoint {
            year: ymd(2010, 1, 1),
            value: Decimal::new(126_450, 2),
        },
    ];
    let specs = investment_annotations(&points);

    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].title, "Initial Investment:");
    assert_eq!(specs[0].label, "$10.00");
    assert_eq!((specs[0].dx, specs[0].dy), (80.0, -100.0));
    assert_eq!(specs[1].title, "Investment Value in 2010:");
    assert_eq!(specs[1].label, "$1,264.50");
    assert_eq!((specs[1].dx, specs[1].dy), (-80.0, -30.0));

    assert!(investment_annotations(&[]).is_empty());
}

#[test]
fn callout_below_anchor_draws_connector_underline_and_title() {
    let placed = vec![PlacedAnnotation {
        id: "covid".to_owned(),
        title: "COVID-19 Pandemic".to_owned(),
        label: String::new(),
        anchor_x: 100.0,
        anchor_y: 50.0,
        dx: 0.0,
        dy: 100.0,
    }];
    let mut frame = RenderFrame::new(Viewport::new(900, 600));
    append_annotations(&mut frame, &placed, (70.0, 30.0), AnnotationStyle::default());

    assert_eq!(frame.lines.len(), 2);
    let connector = frame.lines[0];
    assert_eq!((connector.x1, connector.y1), (170.0, 80.0));
    assert_eq!((connector.x2, connector.y2), (170.0, 180.0));

    assert_eq!(frame.texts.len(), 1);
    let title = &frame.texts[0];
    assert!(title.bold);
    assert_eq!(title.h_align, TextHAlign::Left);
    assert_eq!(title.y, 180.0 + 4.0 + 12.0);
    frame.validate().expect("valid frame");
}

#[test]
fn callout_left_of_anchor_is_right_aligned_with_label() {
    let placed = vec![PlacedAnnotation {
        id: "final".to_owned(),
        title: "Investment Value in 2023:".to_owned(),
        label: "$52.31".to_owned(),
        anchor_x: 600.0,
        anchor_y: 100.0,
        dx: -80.0,
        dy: -30.0,
    }];
    let mut frame = RenderFrame::new(Viewport::new(800, 500));
    append_annotations(&mut frame, &placed, (0.0, 0.0), AnnotationStyle::default());

    assert_eq!(frame.texts.len(), 2);
    assert!(frame.texts.iter().all(|text| text.h_align == TextHAlign::Right));
    assert!(frame.texts[0].y < frame.texts[1].y, "title sits above label");
    let underline = frame.lines[1];
    assert!(underline.x2 < underline.x1);
}

#[test]
fn zero_offset_skips_connector() {
    let placed = vec![PlacedAnnotation {
        id: "flat".to_owned(),
        title: "Flat".to_owned(),
        label: String::new(),
        anchor_x: 10.0,
        anchor_y: 10.0,
        dx: 0.0,
        dy: 0.0,
    }];
    let mut frame = RenderFrame::new(Viewport::new(100, 100));
    append_annotations(&mut frame, &placed, (0.0, 0.0), AnnotationStyle::default());
    assert_eq!(frame.lines.len(), 1);
}

#[test]
fn style_validation_rejects_bad_sizes() {
    assert!(AnnotationStyle::default().validate().is_ok());
    let style = AnnotationStyle {
        title_font_px: 0.0,
        ..AnnotationStyle::default()
    };
    assert!(style.validate().is_err());
}
