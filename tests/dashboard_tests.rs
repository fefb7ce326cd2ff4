use sp500_charts::api::{ChartSection, Dashboard, DashboardConfig, cancellable};
use sp500_charts::core::primitives::format_currency;
use sp500_charts::data::{DataSource, ResourceLocator};
use sp500_charts::error::ChartError;

const COMPANIES: &str = "Company,Symbol,Weight,Price\n\
Apple Inc.,AAPL,7.0%,189.25\n\
Microsoft Corp,MSFT,6.5%,402.10\n\
Nvidia Corp,NVDA,3.0%,610.00\n\
Unnamed Row,,1.0%,1.00\n";

const PERFORMANCE: &str = "Symbol,YTD Return\n\
AAPL,12.5%\n\
MSFT,-3.2%\n";

const INDEX: &str = "Date,SP500\n\
1979-12-31,107.94\n\
1980-01-31,114.16\n\
2000-07-31,1430.83\n\
2020-02-29,2954.22\n";

const HISTORY: &str = "Year,Performance\n\
2008,-37\n\
2009,10\n\
2010,-5\n\
2011,20\n";

fn full_source() -> DataSource {
    DataSource::in_memory([
        ("data/sp.csv", COMPANIES),
        ("data/sp_performance.csv", PERFORMANCE),
        ("data/index_data.csv", INDEX),
        ("data/history.csv", HISTORY),
    ])
}

#[tokio::test]
async fn all_sections_ready_with_complete_data() {
    let dashboard = Dashboard::load(&full_source(), &DashboardConfig::default()).await;

    let historical = dashboard.historical.ready().expect("historical");
    assert_eq!(historical.series().len(), 3);

    let treemap = dashboard.treemap.ready().expect("treemap");
    let symbols: Vec<&str> = treemap
        .companies()
        .iter()
        .map(|company| company.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["AAPL", "MSFT", "NVDA"]);
    assert_eq!(treemap.companies()[1].ytd_return, Some(-3.2));
    assert_eq!(treemap.companies()[2].ytd_return_text, "");

    let investment = dashboard.investment.ready().expect("investment");
    let last = investment.points().last().expect("point");
    assert_eq!(format_currency(last.value), "$12.54");
}

#[tokio::test]
async fn missing_file_fails_only_its_section() {
    let source = DataSource::in_memory([
        ("data/sp.csv", COMPANIES),
        ("data/sp_performance.csv", PERFORMANCE),
        ("data/index_data.csv", INDEX),
    ]);
    let dashboard = Dashboard::load(&source, &DashboardConfig::default()).await;

    assert!(dashboard.historical.is_ready());
    assert!(dashboard.treemap.is_ready());
    assert!(matches!(
        dashboard.investment.error(),
        Some(ChartError::Load { resource, .. }) if resource.contains("history.csv")
    ));
}

#[tokio::test]
async fn treemap_needs_both_company_files() {
    let source = DataSource::in_memory([
        ("data/sp.csv", COMPANIES),
        ("data/index_data.csv", INDEX),
        ("data/history.csv", HISTORY),
    ]);
    let dashboard = Dashboard::load(&source, &DashboardConfig::default()).await;

    assert!(matches!(dashboard.treemap, ChartSection::Failed(_)));
    assert!(dashboard.historical.is_ready());
    assert!(dashboard.investment.is_ready());
}

#[tokio::test]
async fn data_without_drawable_rows_is_empty() {
    let source = DataSource::in_memory([
        ("data/sp.csv", "Company,Symbol,Weight,Price\nZero Co,ZERO,0%,1.00\n"),
        ("data/sp_performance.csv", "Symbol,YTD Return\n"),
        ("data/index_data.csv", "Date,SP500\n1970-01-31,85.02\n"),
        ("data/history.csv", "Year,Performance\n2001,-12\n"),
    ]);
    let dashboard = Dashboard::load(&source, &DashboardConfig::default()).await;

    assert!(matches!(dashboard.historical, ChartSection::Empty));
    assert!(matches!(dashboard.treemap, ChartSection::Empty));
    assert!(matches!(dashboard.investment, ChartSection::Empty));
}

#[tokio::test]
async fn files_on_disk_resolve_under_base_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).expect("data dir");
    for (name, text) in [
        ("sp.csv", COMPANIES),
        ("sp_performance.csv", PERFORMANCE),
        ("index_data.csv", INDEX),
        ("history.csv", HISTORY),
    ] {
        std::fs::write(data.join(name), text).expect("write csv");
    }

    let base = dir.path().to_string_lossy().into_owned();
    let config = DashboardConfig::default().with_base_path_override(Some(base.clone()));
    let source = DataSource::located(ResourceLocator::new(base));
    let dashboard = Dashboard::load(&source, &config).await;

    assert!(dashboard.historical.is_ready());
    assert!(dashboard.treemap.is_ready());
    assert!(dashboard.investment.is_ready());
}

#[tokio::test]
async fn amount_change_through_ready_section() {
    let mut dashboard = Dashboard::load(&full_source(), &DashboardConfig::default()).await;
    let investment = dashboard.investment.ready_mut().expect("investment");

    assert!(investment.set_initial_investment(100.0).expect("recompute"));
    let last = investment.points().last().expect("point");
    assert_eq!(format_currency(last.value), "$125.40");
}

#[tokio::test]
async fn aborted_load_resolves_to_cancelled() {
    let source = full_source();
    let config = DashboardConfig::default();
    let (guard, load) = Dashboard::load_cancellable(&source, &config);

    guard.abort();
    assert!(guard.is_aborted());
    assert!(matches!(load.await, Err(ChartError::Cancelled { resource }) if resource == "dashboard"));
}

#[tokio::test]
async fn dropping_the_guard_cancels_the_load() {
    let source = full_source();
    let config = DashboardConfig::default();
    let (guard, load) = Dashboard::load_cancellable(&source, &config);

    drop(guard);
    assert!(matches!(load.await, Err(ChartError::Cancelled { .. })));
}

#[tokio::test]
async fn guarded_load_completes_when_left_alone() {
    let source = full_source();
    let config = DashboardConfig::default();
    let (guard, load) = Dashboard::load_cancellable(&source, &config);

    let dashboard = load.await.expect("dashboard");
    assert!(!guard.is_aborted());
    assert!(dashboard.treemap.is_ready());
}

#[tokio::test]
async fn cancellable_wraps_any_future() {
    let (_guard, value) = cancellable("answer", async { 42 });
    assert_eq!(value.await.expect("value"), 42);
}
