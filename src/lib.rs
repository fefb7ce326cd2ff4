//! sp500-charts: headless S&P 500 chart pipeline.
//!
//! CSV resources flow one way through loading, join/normalize, layout,
//! color mapping and interaction into backend-agnostic `RenderFrame`s that
//! the SVG, Cairo or null renderers draw.

pub mod api;
pub mod color;
pub mod core;
pub mod data;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod telemetry;

pub use api::{
    ChartSection, CompanyTreemapChart, Dashboard, DashboardConfig, HistoricalChart,
    InvestmentChart,
};
pub use error::{ChartError, ChartResult};
