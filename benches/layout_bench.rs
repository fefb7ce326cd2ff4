use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use sp500_charts::color::{DivergingColorScale, DivergingColors};
use sp500_charts::core::{PricePoint, Rect, Viewport};
use sp500_charts::interaction::nearest_index_for_date;
use sp500_charts::layout::{CartesianLayout, TreemapConfig, TreemapLayout};
use std::hint::black_box;

fn monthly_series(len: usize) -> Vec<PricePoint> {
    let start = NaiveDate::from_ymd_opt(1980, 1, 31).expect("valid date");
    (0..len)
        .map(|i| {
            let date = start
                .checked_add_days(Days::new(i as u64 * 30))
                .expect("date in range");
            PricePoint::new(date, 100.0 + i as f64 * 0.75)
        })
        .collect()
}

fn bench_treemap_500(c: &mut Criterion) {
    let weights: Vec<f64> = (1..=500).map(|i| 1.0 / i as f64).collect();
    let canvas = Rect::from_viewport(Viewport::new(800, 550));

    c.bench_function("treemap_squarify_500", |b| {
        b.iter(|| {
            let _ = TreemapLayout::compute(
                black_box(&weights),
                black_box(canvas),
                black_box(TreemapConfig::default()),
            )
            .expect("layout");
        })
    });
}

fn bench_price_projection_10k(c: &mut Criterion) {
    let series = monthly_series(10_000);
    let layout =
        CartesianLayout::for_prices(&series, Viewport::new(800, 500), 500.0).expect("layout");

    c.bench_function("price_projection_10k", |b| {
        b.iter(|| {
            let _ = black_box(layout).project_prices(black_box(&series));
        })
    });
}

fn bench_nearest_lookup_10k(c: &mut Criterion) {
    let series = monthly_series(10_000);
    let query = NaiveDate::from_ymd_opt(2400, 6, 15).expect("valid date");

    c.bench_function("nearest_lookup_10k", |b| {
        b.iter(|| {
            let _ = nearest_index_for_date(black_box(&series), black_box(query));
        })
    });
}

fn bench_diverging_color(c: &mut Criterion) {
    let returns: Vec<f64> = (0..500).map(|i| (i as f64 - 150.0) * 0.2).collect();
    let scale = DivergingColorScale::from_values(returns.iter().copied(), DivergingColors::default());

    c.bench_function("diverging_color_500", |b| {
        b.iter(|| {
            for value in &returns {
                let _ = scale.color(black_box(*value));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_treemap_500,
    bench_price_projection_10k,
    bench_nearest_lookup_10k,
    bench_diverging_color
);
criterion_main!(benches);
