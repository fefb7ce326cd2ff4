use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::{CategoricalPalette, DivergingColors, SET2_HEX};
use crate::core::{Margins, PlotArea, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{AnnotationSpec, historical_events};
use crate::layout::{LineCurve, SQUARIFY_RATIO, TreemapConfig};
use crate::render::Color;

/// Environment variable overriding [`DashboardConfig::base_path`].
pub const BASE_PATH_ENV: &str = "SP500_BASE_PATH";

/// File names of the four CSV inputs, relative to the base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNames {
    #[serde(default = "default_companies_resource")]
    pub companies: String,
    #[serde(default = "default_performance_resource")]
    pub performance: String,
    #[serde(default = "default_index_resource")]
    pub index_data: String,
    #[serde(default = "default_history_resource")]
    pub history: String,
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self {
            companies: default_companies_resource(),
            performance: default_performance_resource(),
            index_data: default_index_resource(),
            history: default_history_resource(),
        }
    }
}

/// Historical index line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalChartConfig {
    #[serde(default = "default_historical_plot")]
    pub plot: Viewport,
    #[serde(default = "default_historical_margins")]
    pub margins: Margins,
    /// Rows dated before January 1st of this year are dropped.
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// Added to the series maximum to get the top of the value axis.
    #[serde(default = "default_value_headroom")]
    pub value_headroom: f64,
    #[serde(default = "default_historical_tooltip_offset")]
    pub tooltip_offset: (f64, f64),
    #[serde(default = "default_two")]
    pub year_tick_step: u32,
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_focus_radius")]
    pub focus_radius: f64,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub curve: LineCurve,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_historical_title")]
    pub title: String,
    #[serde(default = "default_year_title")]
    pub x_title: String,
    #[serde(default = "default_index_value_title")]
    pub y_title: String,
    #[serde(default = "historical_events")]
    pub annotations: Vec<AnnotationSpec>,
}

impl Default for HistoricalChartConfig {
    fn default() -> Self {
        Self {
            plot: default_historical_plot(),
            margins: default_historical_margins(),
            min_year: default_min_year(),
            value_headroom: default_value_headroom(),
            tooltip_offset: default_historical_tooltip_offset(),
            year_tick_step: default_two(),
            value_tick_count: default_value_tick_count(),
            focus_radius: default_focus_radius(),
            line_color: default_line_color(),
            line_width: default_line_width(),
            curve: LineCurve::default(),
            grid_color: default_grid_color(),
            title: default_historical_title(),
            x_title: default_year_title(),
            y_title: default_index_value_title(),
            annotations: historical_events(),
        }
    }
}

impl HistoricalChartConfig {
    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(self.plot, self.margins)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_plot("historical", self.plot, self.margins)?;
        validate_finite("historical.value_headroom", self.value_headroom)?;
        validate_offset("historical.tooltip_offset", self.tooltip_offset)?;
        validate_positive("historical.focus_radius", self.focus_radius)?;
        validate_positive("historical.line_width", self.line_width)?;
        if self.year_tick_step == 0 {
            return Err(ChartError::Config(
                "historical.year_tick_step must be > 0".to_owned(),
            ));
        }
        for spec in &self.annotations {
            validate_offset("historical.annotations offset", (spec.dx, spec.dy))?;
        }
        parse_color("historical.line_color", &self.line_color)?;
        parse_color("historical.grid_color", &self.grid_color)?;
        Ok(())
    }
}

/// Gradient legend under the treemap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    pub viewport: Viewport,
    pub bar_x: f64,
    pub bar_y: f64,
    pub bar_width: f64,
    pub bar_height: f64,
    pub tick_count: usize,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(300, 50),
            bar_x: 20.0,
            bar_y: 20.0,
            bar_width: 260.0,
            bar_height: 10.0,
            tick_count: 5,
        }
    }
}

/// Constituent treemap and its legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapChartConfig {
    #[serde(default = "default_treemap_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_two_px")]
    pub padding_px: f64,
    #[serde(default = "default_min_label_width")]
    pub min_label_width_px: f64,
    /// Drawn instead of the symbol in cells too narrow for it.
    #[serde(default = "default_placeholder")]
    pub placeholder_label: String,
    #[serde(default = "default_label_offset")]
    pub label_offset: (f64, f64),
    #[serde(default = "default_label_font")]
    pub label_font_px: f64,
    #[serde(default = "default_treemap_tooltip_offset")]
    pub tooltip_offset: (f64, f64),
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default = "default_negative_color")]
    pub negative_color: String,
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,
    #[serde(default = "default_positive_color")]
    pub positive_color: String,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_treemap_title")]
    pub title: String,
    /// Band above the cells that holds `title`; cells start below it.
    #[serde(default = "default_heading_height")]
    pub heading_height_px: u32,
    /// Caption drawn above the legend bar.
    #[serde(default = "default_legend_caption")]
    pub legend_caption: String,
}

impl Default for TreemapChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_treemap_viewport(),
            padding_px: default_two_px(),
            min_label_width_px: default_min_label_width(),
            placeholder_label: default_placeholder(),
            label_offset: default_label_offset(),
            label_font_px: default_label_font(),
            tooltip_offset: default_treemap_tooltip_offset(),
            legend: LegendConfig::default(),
            negative_color: default_negative_color(),
            neutral_color: default_neutral_color(),
            positive_color: default_positive_color(),
            palette: default_palette(),
            title: default_treemap_title(),
            heading_height_px: default_heading_height(),
            legend_caption: default_legend_caption(),
        }
    }
}

impl TreemapChartConfig {
    /// Full drawing surface: the heading band stacked on the cell area.
    #[must_use]
    pub fn surface(&self) -> Viewport {
        Viewport::new(
            self.viewport.width,
            self.viewport.height.saturating_add(self.heading_height_px),
        )
    }

    /// Region the cells tile, in surface pixels.
    #[must_use]
    pub fn cell_canvas(&self) -> Rect {
        let top = f64::from(self.heading_height_px);
        Rect::new(
            0.0,
            top,
            self.viewport.width_px(),
            top + self.viewport.height_px(),
        )
    }

    #[must_use]
    pub fn layout_config(&self) -> TreemapConfig {
        TreemapConfig {
            padding_px: self.padding_px,
            ratio: SQUARIFY_RATIO,
        }
    }

    pub fn diverging_colors(&self) -> ChartResult<DivergingColors> {
        Ok(DivergingColors {
            negative: parse_color("treemap.negative_color", &self.negative_color)?,
            neutral: parse_color("treemap.neutral_color", &self.neutral_color)?,
            positive: parse_color("treemap.positive_color", &self.positive_color)?,
        })
    }

    pub fn categorical_palette(&self) -> ChartResult<CategoricalPalette> {
        CategoricalPalette::from_hex(&self.palette)
            .map_err(|err| ChartError::Config(format!("treemap.palette: {err}")))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::Config(
                "treemap.viewport must be non-empty".to_owned(),
            ));
        }
        if !self.legend.viewport.is_valid() {
            return Err(ChartError::Config(
                "treemap.legend.viewport must be non-empty".to_owned(),
            ));
        }
        self.layout_config()
            .validate()
            .map_err(|err| ChartError::Config(format!("treemap.padding_px: {err}")))?;
        validate_finite("treemap.min_label_width_px", self.min_label_width_px)?;
        validate_positive("treemap.label_font_px", self.label_font_px)?;
        validate_positive("treemap.legend.bar_width", self.legend.bar_width)?;
        validate_positive("treemap.legend.bar_height", self.legend.bar_height)?;
        validate_offset("treemap.label_offset", self.label_offset)?;
        validate_offset("treemap.tooltip_offset", self.tooltip_offset)?;
        validate_offset("treemap.legend bar", (self.legend.bar_x, self.legend.bar_y))?;
        if self.placeholder_label.is_empty() {
            return Err(ChartError::Config(
                "treemap.placeholder_label must not be empty".to_owned(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ChartError::Config(
                "treemap.palette must not be empty".to_owned(),
            ));
        }
        self.diverging_colors()?;
        self.categorical_palette()?;
        Ok(())
    }
}

/// Investment growth simulator chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentChartConfig {
    #[serde(default = "default_investment_plot")]
    pub plot: Viewport,
    #[serde(default = "default_investment_margins")]
    pub margins: Margins,
    /// First year of returns the simulation starts from.
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_initial_investment")]
    pub initial_investment: f64,
    /// Value axis top is `max * value_factor + value_offset`.
    #[serde(default = "default_value_factor")]
    pub value_factor: f64,
    #[serde(default = "default_value_offset")]
    pub value_offset: f64,
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
    #[serde(default = "default_investment_tooltip_offset")]
    pub tooltip_offset: (f64, f64),
    #[serde(default = "default_one")]
    pub year_tick_step: u32,
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_investment_title")]
    pub title: String,
    #[serde(default = "default_year_title")]
    pub x_title: String,
    #[serde(default = "default_investment_value_title")]
    pub y_title: String,
}

impl Default for InvestmentChartConfig {
    fn default() -> Self {
        Self {
            plot: default_investment_plot(),
            margins: default_investment_margins(),
            start_year: default_start_year(),
            initial_investment: default_initial_investment(),
            value_factor: default_value_factor(),
            value_offset: default_value_offset(),
            dot_radius: default_dot_radius(),
            tooltip_offset: default_investment_tooltip_offset(),
            year_tick_step: default_one(),
            value_tick_count: default_value_tick_count(),
            line_color: default_line_color(),
            line_width: default_line_width(),
            grid_color: default_grid_color(),
            title: default_investment_title(),
            x_title: default_year_title(),
            y_title: default_investment_value_title(),
        }
    }
}

impl InvestmentChartConfig {
    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(self.plot, self.margins)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_plot("investment", self.plot, self.margins)?;
        if !self.initial_investment.is_finite() || self.initial_investment < 0.0 {
            return Err(ChartError::Config(
                "investment.initial_investment must be finite and >= 0".to_owned(),
            ));
        }
        validate_finite("investment.value_factor", self.value_factor)?;
        validate_finite("investment.value_offset", self.value_offset)?;
        validate_positive("investment.dot_radius", self.dot_radius)?;
        validate_positive("investment.line_width", self.line_width)?;
        validate_offset("investment.tooltip_offset", self.tooltip_offset)?;
        if self.year_tick_step == 0 {
            return Err(ChartError::Config(
                "investment.year_tick_step must be > 0".to_owned(),
            ));
        }
        parse_color("investment.line_color", &self.line_color)?;
        parse_color("investment.grid_color", &self.grid_color)?;
        Ok(())
    }
}

/// Settings for the whole page: where data lives and how each chart looks.
///
/// Every field has a default, so a partial JSON file only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub resources: ResourceNames,
    #[serde(default)]
    pub historical: HistoricalChartConfig,
    #[serde(default)]
    pub treemap: TreemapChartConfig,
    #[serde(default)]
    pub investment: InvestmentChartConfig,
}

impl DashboardConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::Config(format!("failed to parse config json: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            ChartError::Config(format!("failed to read `{}`: {err}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::Config(format!("failed to serialize config: {err}")))
    }

    /// Applies `SP500_BASE_PATH` when set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_base_path_override(std::env::var(BASE_PATH_ENV).ok())
    }

    #[must_use]
    pub fn with_base_path_override(mut self, base_path: Option<String>) -> Self {
        if let Some(base_path) = base_path {
            info!(%base_path, "base path overridden");
            self.base_path = base_path;
        }
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("resources.companies", &self.resources.companies),
            ("resources.performance", &self.resources.performance),
            ("resources.index_data", &self.resources.index_data),
            ("resources.history", &self.resources.history),
        ] {
            if value.trim().is_empty() {
                return Err(ChartError::Config(format!("{name} must not be empty")));
            }
        }
        self.historical.validate()?;
        self.treemap.validate()?;
        self.investment.validate()
    }
}

pub(crate) fn parse_color(name: &str, hex: &str) -> ChartResult<Color> {
    Color::from_hex(hex).map_err(|err| ChartError::Config(format!("{name}: {err}")))
}

fn validate_plot(name: &str, plot: Viewport, margins: Margins) -> ChartResult<()> {
    if !plot.is_valid() {
        return Err(ChartError::Config(format!("{name}.plot must be non-empty")));
    }
    if !margins.is_valid() {
        return Err(ChartError::Config(format!(
            "{name}.margins must be finite and >= 0"
        )));
    }
    Ok(())
}

fn validate_finite(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::Config(format!("{name} must be finite")));
    }
    Ok(())
}

fn validate_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::Config(format!("{name} must be finite and > 0")));
    }
    Ok(())
}

fn validate_offset(name: &str, (dx, dy): (f64, f64)) -> ChartResult<()> {
    if !dx.is_finite() || !dy.is_finite() {
        return Err(ChartError::Config(format!("{name} must be finite")));
    }
    Ok(())
}

fn default_companies_resource() -> String {
    "data/sp.csv".to_owned()
}

fn default_performance_resource() -> String {
    "data/sp_performance.csv".to_owned()
}

fn default_index_resource() -> String {
    "data/index_data.csv".to_owned()
}

fn default_history_resource() -> String {
    "data/history.csv".to_owned()
}

fn default_historical_plot() -> Viewport {
    Viewport::new(800, 500)
}

fn default_historical_margins() -> Margins {
    Margins::new(30.0, 50.0, 70.0, 70.0)
}

fn default_min_year() -> i32 {
    1980
}

fn default_value_headroom() -> f64 {
    500.0
}

fn default_historical_tooltip_offset() -> (f64, f64) {
    (50.0, -50.0)
}

fn default_one() -> u32 {
    1
}

fn default_two() -> u32 {
    2
}

fn default_two_px() -> f64 {
    2.0
}

fn default_value_tick_count() -> usize {
    10
}

fn default_focus_radius() -> f64 {
    8.0
}

fn default_line_color() -> String {
    "#2ec4b6".to_owned()
}

fn default_line_width() -> f64 {
    2.5
}

fn default_grid_color() -> String {
    "#4e4e4e".to_owned()
}

fn default_historical_title() -> String {
    "S&P 500 Index Historical Chart".to_owned()
}

fn default_year_title() -> String {
    "Year".to_owned()
}

fn default_index_value_title() -> String {
    "Index Value".to_owned()
}

fn default_treemap_viewport() -> Viewport {
    Viewport::new(800, 550)
}

fn default_min_label_width() -> f64 {
    30.0
}

fn default_placeholder() -> String {
    ".".to_owned()
}

fn default_label_offset() -> (f64, f64) {
    (4.0, 14.0)
}

fn default_label_font() -> f64 {
    13.0
}

fn default_treemap_tooltip_offset() -> (f64, f64) {
    (10.0, -110.0)
}

fn default_negative_color() -> String {
    "#ff0000".to_owned()
}

fn default_neutral_color() -> String {
    "#ffffff".to_owned()
}

fn default_positive_color() -> String {
    "#008000".to_owned()
}

fn default_palette() -> Vec<String> {
    SET2_HEX.iter().map(|hex| (*hex).to_owned()).collect()
}

fn default_treemap_title() -> String {
    "S&P 500 Index Companies by Market Cap Weight".to_owned()
}

fn default_heading_height() -> u32 {
    40
}

fn default_legend_caption() -> String {
    "Year to Date Price Return:".to_owned()
}

fn default_investment_plot() -> Viewport {
    Viewport::new(670, 400)
}

fn default_investment_margins() -> Margins {
    Margins::new(50.0, 50.0, 50.0, 80.0)
}

fn default_start_year() -> i32 {
    2009
}

fn default_initial_investment() -> f64 {
    10.0
}

fn default_value_factor() -> f64 {
    1.5
}

fn default_value_offset() -> f64 {
    5.0
}

fn default_dot_radius() -> f64 {
    5.0
}

fn default_investment_tooltip_offset() -> (f64, f64) {
    (10.0, -40.0)
}

fn default_investment_title() -> String {
    "S&P 500 Historical Returns".to_owned()
}

fn default_investment_value_title() -> String {
    "Investment Value ($)".to_owned()
}
