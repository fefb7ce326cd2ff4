use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, trace};

use crate::core::primitives::{format_currency, format_year};
use crate::core::{InvestmentAmount, InvestmentInput, InvestmentPoint, YearReturn, simulate_growth};
use crate::data::normalize_year_returns;
use crate::error::ChartResult;
use crate::extensions::{
    AnnotationStyle, PlacedAnnotation, append_annotations, investment_annotations,
    resolve_annotations,
};
use crate::interaction::{
    HoverState, PointerEvent, Tooltip, TooltipLine, TooltipStyle, nearest_index,
};
use crate::layout::{CartesianLayout, ProjectedPoint};
use crate::render::{CirclePrimitive, Color, PolylinePrimitive, RenderFrame, Renderer};

use super::axes::{AxisDecor, append_axes};
use super::config::{InvestmentChartConfig, parse_color};

/// Growth of a starting amount compounded by yearly index returns.
///
/// Changing the amount recomputes the series, layout and callouts in full.
#[derive(Debug, Clone)]
pub struct InvestmentChart {
    config: InvestmentChartConfig,
    returns: Vec<YearReturn>,
    input: InvestmentInput,
    points: Vec<InvestmentPoint>,
    layout: CartesianLayout,
    projected: Vec<ProjectedPoint>,
    annotations: Vec<PlacedAnnotation>,
    line_color: Color,
    grid_color: Color,
    hover: HoverState,
    tooltip: Tooltip,
}

impl InvestmentChart {
    pub fn new(config: InvestmentChartConfig, returns: Vec<YearReturn>) -> ChartResult<Self> {
        config.validate()?;
        let returns = normalize_year_returns(returns, config.start_year);
        let input = InvestmentInput::new(InvestmentAmount::from_f64(config.initial_investment)?);
        let mut chart = Self {
            line_color: parse_color("investment.line_color", &config.line_color)?,
            grid_color: parse_color("investment.grid_color", &config.grid_color)?,
            layout: CartesianLayout::for_investment(
                &[],
                config.plot,
                config.value_factor,
                config.value_offset,
            )?,
            config,
            returns,
            input,
            points: Vec::new(),
            projected: Vec::new(),
            annotations: Vec::new(),
            hover: HoverState::default(),
            tooltip: Tooltip::new(),
        };
        chart.recompute()?;
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> &InvestmentChartConfig {
        &self.config
    }

    #[must_use]
    pub fn returns(&self) -> &[YearReturn] {
        &self.returns
    }

    #[must_use]
    pub fn initial_investment(&self) -> InvestmentAmount {
        self.input.current()
    }

    #[must_use]
    pub fn points(&self) -> &[InvestmentPoint] {
        &self.points
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

    /// Applies a user-entered amount.
    ///
    /// Negative or non-finite input keeps the previous amount and returns
    /// `Ok(false)`; an accepted amount rebuilds everything and returns
    /// `Ok(true)`.
    pub fn set_initial_investment(&mut self, raw: f64) -> ChartResult<bool> {
        if !self.input.submit(raw) {
            return Ok(false);
        }
        info!(amount = %self.input.current().value(), "initial investment changed");
        self.pointer_leave();
        self.recompute()?;
        Ok(true)
    }

    fn recompute(&mut self) -> ChartResult<()> {
        let points = simulate_growth(self.input.current(), &self.returns);
        let layout = CartesianLayout::for_investment(
            &points,
            self.config.plot,
            self.config.value_factor,
            self.config.value_offset,
        )?;
        let projected = layout.project_investment(&points)?;
        let annotations =
            resolve_annotations(&investment_annotations(&points), &points, |point| {
                layout.project(point.year, point.value.to_f64().unwrap_or_default())
            });
        debug!(points = points.len(), "investment series recomputed");

        self.points = points;
        self.layout = layout;
        self.projected = projected;
        self.annotations = annotations;
        Ok(())
    }

    /// Snaps the tooltip to the bisected year under the pointer.
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
        let Some(index) = nearest_index(&self.points, query) else {
            self.pointer_leave();
            return None;
        };
        let point = self.points[index];
        let projected = self.projected[index];
        trace!(index, year = %point.year, "investment hover");

        self.hover.snap(index, projected.x, projected.y);
        self.tooltip.show(
            (event.x, event.y),
            self.config.tooltip_offset,
            vec![
                TooltipLine::plain(format!("Investment Value in {}:", format_year(point.year))),
                TooltipLine::heading(format_currency(point.value)),
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

        let surface_points: Vec<(f64, f64)> = self
            .projected
            .iter()
            .map(|point| area.to_surface(point.x, point.y))
            .collect();
        if surface_points.len() > 1 {
            frame.push_polyline(PolylinePrimitive::new(
                surface_points.clone(),
                self.config.line_width,
                self.line_color,
            ));
        }
        for (cx, cy) in surface_points {
            frame.push_circle(CirclePrimitive::new(
                cx,
                cy,
                self.config.dot_radius,
                self.line_color,
            ));
        }

        append_annotations(
            &mut frame,
            &self.annotations,
            (area.margins.left, area.margins.top),
            AnnotationStyle::default(),
        );
        self.tooltip.append_to(&mut frame, TooltipStyle::default());

        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_frame()?;
        renderer.render(&frame)
    }
}
