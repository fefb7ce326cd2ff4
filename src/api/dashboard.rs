use std::future::Future;

use futures::future::{AbortHandle, abortable};
use tracing::{info, warn};

use crate::core::{PricePoint, YearReturn};
use crate::data::{
    CsvLoader, DataSource, Loaded, columns, join_companies, price_point_from_row,
    year_return_from_row,
};
use crate::error::{ChartError, ChartResult};

use super::config::DashboardConfig;
use super::historical_chart::HistoricalChart;
use super::investment_chart::InvestmentChart;
use super::treemap_chart::CompanyTreemapChart;

/// Outcome of loading one chart. Sections fail independently.
#[derive(Debug)]
pub enum ChartSection<T> {
    Ready(T),
    Failed(ChartError),
    /// Loaded fine but there is nothing to draw.
    Empty,
}

impl<T> ChartSection<T> {
    fn from_result(name: &str, result: ChartResult<T>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(chart) if is_empty(&chart) => {
                info!(section = name, "chart has no data");
                Self::Empty
            }
            Ok(chart) => Self::Ready(chart),
            Err(err) => {
                warn!(section = name, error = %err, "chart failed to load");
                Self::Failed(err)
            }
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(chart) => Some(chart),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(chart) => Some(chart),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ChartError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// The three charts of the page.
#[derive(Debug)]
pub struct Dashboard {
    pub historical: ChartSection<HistoricalChart>,
    pub treemap: ChartSection<CompanyTreemapChart>,
    pub investment: ChartSection<InvestmentChart>,
}

impl Dashboard {
    /// Loads every section concurrently. Never fails as a whole: each
    /// section carries its own outcome and nothing is retried.
    pub async fn load(source: &DataSource, config: &DashboardConfig) -> Self {
        let loader = CsvLoader::new(source);
        let (historical, treemap, investment) = futures::join!(
            load_historical(&loader, config),
            load_treemap(&loader, config),
            load_investment(&loader, config),
        );

        Self {
            historical: ChartSection::from_result("historical", historical, |chart| {
                chart.series().is_empty()
            }),
            treemap: ChartSection::from_result("treemap", treemap, |chart| {
                chart.layout().is_empty()
            }),
            investment: ChartSection::from_result("investment", investment, |chart| {
                chart.points().is_empty()
            }),
        }
    }

    /// Like [`Dashboard::load`], but abortable through the returned guard.
    ///
    /// Aborting or dropping the guard before the load finishes resolves the
    /// future to [`ChartError::Cancelled`] and no chart is built.
    pub fn load_cancellable<'a>(
        source: &'a DataSource,
        config: &'a DashboardConfig,
    ) -> (LoadGuard, impl Future<Output = ChartResult<Self>> + 'a) {
        cancellable("dashboard", Self::load(source, config))
    }
}

/// Cancels the paired load when aborted or dropped.
#[derive(Debug)]
pub struct LoadGuard {
    handle: AbortHandle,
    resource: String,
}

impl LoadGuard {
    pub fn abort(&self) {
        if !self.handle.is_aborted() {
            info!(resource = %self.resource, "load cancelled");
        }
        self.handle.abort();
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Wraps `future` so a [`LoadGuard`] can stop it.
pub fn cancellable<T, F>(
    resource: impl Into<String>,
    future: F,
) -> (LoadGuard, impl Future<Output = ChartResult<T>>)
where
    F: Future<Output = T>,
{
    let resource = resource.into();
    let (future, handle) = abortable(future);
    let guard = LoadGuard {
        handle,
        resource: resource.clone(),
    };
    let future = async move {
        future
            .await
            .map_err(|_| ChartError::Cancelled { resource })
    };
    (guard, future)
}

pub async fn load_price_series(
    loader: &CsvLoader<'_>,
    resource: &str,
) -> ChartResult<Loaded<PricePoint>> {
    loader
        .load_mapped(resource, columns::DATE, price_point_from_row)
        .await
}

pub async fn load_year_returns(
    loader: &CsvLoader<'_>,
    resource: &str,
) -> ChartResult<Loaded<YearReturn>> {
    loader
        .load_mapped(resource, columns::YEAR, year_return_from_row)
        .await
}

pub async fn load_historical(
    loader: &CsvLoader<'_>,
    config: &DashboardConfig,
) -> ChartResult<HistoricalChart> {
    let Loaded { records, report } =
        load_price_series(loader, &config.resources.index_data).await?;
    info!(
        resource = %report.resource,
        rows = report.rows_total,
        kept = records.len(),
        "historical data loaded"
    );
    HistoricalChart::new(config.historical.clone(), records)
}

/// Waits for both company files before joining them.
pub async fn load_treemap(
    loader: &CsvLoader<'_>,
    config: &DashboardConfig,
) -> ChartResult<CompanyTreemapChart> {
    let (companies, performance) = futures::try_join!(
        loader.load_keyed(&config.resources.companies, columns::SYMBOL),
        loader.load_keyed(&config.resources.performance, columns::SYMBOL),
    )?;
    info!(
        companies = companies.records.len(),
        performance = performance.records.len(),
        "company data loaded"
    );
    let records = join_companies(companies.records, performance.records);
    CompanyTreemapChart::new(config.treemap.clone(), records)
}

pub async fn load_investment(
    loader: &CsvLoader<'_>,
    config: &DashboardConfig,
) -> ChartResult<InvestmentChart> {
    let Loaded { records, report } = load_year_returns(loader, &config.resources.history).await?;
    info!(
        resource = %report.resource,
        years = records.len(),
        "return history loaded"
    );
    InvestmentChart::new(config.investment.clone(), records)
}
