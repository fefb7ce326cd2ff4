//! Chart views, page composition and configuration.

mod axes;
mod config;
mod dashboard;
mod historical_chart;
mod investment_chart;
mod json_contract;
mod treemap_chart;

pub use config::{
    BASE_PATH_ENV, DashboardConfig, HistoricalChartConfig, InvestmentChartConfig, LegendConfig,
    ResourceNames, TreemapChartConfig,
};
pub use dashboard::{
    ChartSection, Dashboard, LoadGuard, cancellable, load_historical, load_investment,
    load_price_series, load_treemap, load_year_returns,
};
pub use historical_chart::HistoricalChart;
pub use investment_chart::InvestmentChart;
pub use json_contract::{RENDER_FRAME_JSON_SCHEMA_V1, RenderFrameJsonContractV1};
pub use treemap_chart::{CompanyTreemapChart, TreemapCell};
