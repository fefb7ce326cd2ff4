use tracing::{debug, trace};

use crate::core::primitives::format_date_label;
use crate::core::PricePoint;
use crate::data::normalize_price_series;
use crate::error::ChartResult;
use crate::extensions::{
    AnnotationStyle, PlacedAnnotation, append_annotations, resolve_annotations,
};
use crate::interaction::{
    HoverState, PointerEvent, Tooltip, TooltipLine, TooltipStyle, nearest_index,
};
use crate::layout::{CartesianLayout, ProjectedPoint};
use crate::render::{CirclePrimitive, Color, PolylinePrimitive, RenderFrame, Renderer};

use super::axes::{AxisDecor, append_axes};
use super::config::{HistoricalChartConfig, parse_color};

/// Index value over time with event callouts and a hover readout.
#[derive(Debug, Clone)]
pub struct HistoricalChart {
    config: HistoricalChartConfig,
    series: Vec<PricePoint>,
    layout: CartesianLayout,
    projected: Vec<ProjectedPoint>,
    annotations: Vec<PlacedAnnotation>,
    line_color: Color,
    grid_color: Color,
    hover: HoverState,
    tooltip: Tooltip,
}

impl HistoricalChart {
    /// Builds the chart; `series` is filtered, sorted and de-duplicated first.
    pub fn new(config: HistoricalChartConfig, series: Vec<PricePoint>) -> ChartResult<Self> {
        config.validate()?;
        let series = normalize_price_series(series, config.min_year);
        let layout = CartesianLayout::for_prices(&series, config.plot, config.value_headroom)?;
        let projected = layout.project_prices(&series);
        let annotations = resolve_annotations(&config.annotations, &series, |point| {
            layout.project(point.date, point.value)
        });
        debug!(
            points = series.len(),
            annotations = annotations.len(),
            "historical chart laid out"
        );

        Ok(Self {
            line_color: parse_color("historical.line_color", &config.line_color)?,
            grid_color: parse_color("historical.grid_color", &config.grid_color)?,
            config,
            series,
            layout,
            projected,
            annotations,
            hover: HoverState::default(),
            tooltip: Tooltip::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &HistoricalChartConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &[PricePoint] {
        &self.series
    }

    #[must_use]
    pub fn layout(&self) -> CartesianLayout {
        self.layout
    }

    #[must_use]
    pub fn projected(&self) -> &[ProjectedPoint] {
        &self.projected
    }

    #[must_use]
    pub fn annotations(&self) -> &[PlacedAnnotation] {
        &self.annotations
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Snaps the focus marker and tooltip to the bisected point under the
    /// pointer. Returns the index of that point.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<usize> {
        let area = self.config.plot_area();
        let (x, y) = event.local(area);
        if !event.is_finite() || !area.contains_local(x, y) {
            self.pointer_leave();
            return None;
        }

        let Some(query) = self.layout.time_scale().pixel_to_datetime(x) else {
            self.pointer_leave();
            return None;
        };
        let Some(index) = nearest_index(&self.series, query) else {
            self.pointer_leave();
            return None;
        };
        let point = self.series[index];
        let projected = self.projected[index];
        trace!(index, date = %point.date, "historical hover");

        self.hover.snap(index, projected.x, projected.y);
        self.tooltip.show(
            area.to_surface(projected.x, projected.y),
            self.config.tooltip_offset,
            vec![
                TooltipLine::plain(format_date_label(point.date)),
                TooltipLine::heading(format!("{:.2}", point.value)),
            ],
        );
        Some(index)
    }

    pub fn pointer_leave(&mut self) {
        self.hover.on_pointer_leave();
        self.tooltip.hide();
    }

    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let area = self.config.plot_area();
        let mut frame = RenderFrame::new(area.surface());

        append_axes(
            &mut frame,
            self.layout,
            AxisDecor {
                area,
                axis_color: Color::BLACK,
                grid_color: self.grid_color,
                heading: &self.config.title,
                x_title: &self.config.x_title,
                y_title: &self.config.y_title,
                year_tick_step: self.config.year_tick_step,
                value_tick_count: self.config.value_tick_count,
            },
        );

        if self.projected.len() > 1 {
            frame.push_polyline(PolylinePrimitive::new(
                self.config
                    .curve
                    .flatten(&self.projected)
                    .into_iter()
                    .map(|point| area.to_surface(point.x, point.y))
                    .collect(),
                self.config.line_width,
                self.line_color,
            ));
        }

        append_annotations(
            &mut frame,
            &self.annotations,
            (area.margins.left, area.margins.top),
            AnnotationStyle::default(),
        );

        if self.hover.visible {
            let (cx, cy) = area.to_surface(self.hover.x, self.hover.y);
            frame.push_circle(CirclePrimitive::new(
                cx,
                cy,
                self.config.focus_radius,
                self.line_color,
            ));
        }
        self.tooltip.append_to(&mut frame, TooltipStyle::default());

        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_frame()?;
        renderer.render(&frame)
    }
}
