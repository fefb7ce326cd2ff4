use tracing::{debug, trace};

use crate::color::{CellFill, DivergingColorScale, LegendTick};
use crate::core::{CompanyRecord, Rect};
use crate::error::ChartResult;
use crate::interaction::{HoverState, PointerEvent, Tooltip, TooltipLine, TooltipStyle};
use crate::layout::{TreemapLayout, TreemapLeaf};
use crate::render::{
    Color, GradientStop, LinePrimitive, LinearGradient, Paint, RectPrimitive, RenderFrame,
    Renderer, TextHAlign, TextPrimitive,
};

use super::config::TreemapChartConfig;

const LEGEND_GRADIENT_ID: &str = "legend-gradient";
const LEGEND_TICK_FONT_PX: f64 = 10.0;
const LEGEND_CAPTION_FONT_PX: f64 = 12.0;
const HEADING_FONT_PX: f64 = 18.0;

/// A laid-out company cell ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapCell {
    pub index: usize,
    pub bounds: Rect,
    pub fill: Color,
    pub label: String,
}

/// Constituents sized by index weight and colored by year-to-date return.
#[derive(Debug, Clone)]
pub struct CompanyTreemapChart {
    config: TreemapChartConfig,
    companies: Vec<CompanyRecord>,
    layout: TreemapLayout,
    fill: CellFill,
    hover: HoverState,
    tooltip: Tooltip,
}

impl CompanyTreemapChart {
    pub fn new(config: TreemapChartConfig, companies: Vec<CompanyRecord>) -> ChartResult<Self> {
        config.validate()?;
        let weights: Vec<f64> = companies.iter().map(|company| company.weight).collect();
        let layout = TreemapLayout::compute(&weights, config.cell_canvas(), config.layout_config())?;
        let diverging = DivergingColorScale::from_values(
            companies.iter().filter_map(|company| company.ytd_return),
            config.diverging_colors()?,
        );
        let fill = CellFill::new(diverging, config.categorical_palette()?);
        debug!(
            companies = companies.len(),
            leaves = layout.leaves.len(),
            "treemap laid out"
        );

        Ok(Self {
            config,
            companies,
            layout,
            fill,
            hover: HoverState::default(),
            tooltip: Tooltip::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TreemapChartConfig {
        &self.config
    }

    #[must_use]
    pub fn companies(&self) -> &[CompanyRecord] {
        &self.companies
    }

    #[must_use]
    pub fn layout(&self) -> &TreemapLayout {
        &self.layout
    }

    #[must_use]
    pub fn color_scale(&self) -> &DivergingColorScale {
        &self.fill.diverging
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Cells in layout order, with fill color and label text resolved.
    /// Bounds are surface pixels, below the heading band.
    #[must_use]
    pub fn cells(&self) -> Vec<TreemapCell> {
        self.layout
            .leaves
            .iter()
            .filter_map(|leaf| {
                let company = self.companies.get(leaf.index)?;
                Some(TreemapCell {
                    index: leaf.index,
                    bounds: leaf.bounds,
                    fill: self.fill.resolve(leaf.index, company.ytd_return),
                    label: self.label_for(leaf, company),
                })
            })
            .collect()
    }

    /// Shows the company under the pointer. Returns its input index.
    ///
    /// Staying on the same company only moves the tooltip.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<usize> {
        if !event.is_finite() {
            self.pointer_leave();
            return None;
        }
        let Some(leaf) = self.layout.hit_test(event.x, event.y) else {
            self.pointer_leave();
            return None;
        };
        let index = leaf.index;
        if self.tooltip.is_visible() && self.hover.index == Some(index) {
            let (dx, dy) = self.config.tooltip_offset;
            self.tooltip.move_to(event.x + dx, event.y + dy);
            return Some(index);
        }
        let center = (
            (leaf.bounds.x0 + leaf.bounds.x1) / 2.0,
            (leaf.bounds.y0 + leaf.bounds.y1) / 2.0,
        );
        let Some(company) = self.companies.get(index) else {
            self.pointer_leave();
            return None;
        };
        trace!(index, symbol = %company.symbol, "treemap hover");

        let lines = tooltip_lines(company, &self.fill);
        self.hover.snap(index, center.0, center.1);
        self.tooltip
            .show((event.x, event.y), self.config.tooltip_offset, lines);
        Some(index)
    }

    pub fn pointer_leave(&mut self) {
        self.hover.on_pointer_leave();
        self.tooltip.hide();
    }

    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.surface());
        let (label_dx, label_dy) = self.config.label_offset;

        let band = f64::from(self.config.heading_height_px);
        if !self.config.title.is_empty() && band > HEADING_FONT_PX {
            frame.push_text(
                TextPrimitive::new(
                    self.config.title.as_str(),
                    self.config.viewport.width_px() / 2.0,
                    (band + HEADING_FONT_PX) / 2.0 - 2.0,
                    HEADING_FONT_PX,
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }

        for cell in self.cells() {
            frame.push_rect(
                RectPrimitive::new(
                    cell.bounds.x0,
                    cell.bounds.y0,
                    cell.bounds.width(),
                    cell.bounds.height(),
                    cell.fill,
                )
                .with_border(1.0, Color::BLACK),
            );
            frame.push_text(TextPrimitive::new(
                cell.label,
                cell.bounds.x0 + label_dx,
                cell.bounds.y0 + label_dy,
                self.config.label_font_px,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }

        self.tooltip.append_to(&mut frame, TooltipStyle::default());
        Ok(frame)
    }

    /// Gradient bar from the lowest to the highest return with tick labels.
    pub fn build_legend_frame(&self) -> ChartResult<RenderFrame> {
        let legend = self.config.legend;
        let mut frame = RenderFrame::new(legend.viewport);
        let scale = &self.fill.diverging;

        if !self.config.legend_caption.is_empty() {
            frame.push_text(TextPrimitive::new(
                self.config.legend_caption.as_str(),
                legend.bar_x,
                legend.bar_y - 6.0,
                LEGEND_CAPTION_FONT_PX,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }

        frame.push_gradient(LinearGradient {
            id: LEGEND_GRADIENT_ID.to_owned(),
            stops: scale
                .gradient_stops()
                .into_iter()
                .map(|(offset, color)| GradientStop { offset, color })
                .collect(),
        });
        frame.push_rect(
            RectPrimitive::new(
                legend.bar_x,
                legend.bar_y,
                legend.bar_width,
                legend.bar_height,
                Color::WHITE,
            )
            .with_paint(Paint::Gradient(LEGEND_GRADIENT_ID.to_owned()))
            .with_border(1.0, Color::BLACK),
        );

        let axis_y = legend.bar_y + legend.bar_height;
        for LegendTick {
            offset_px, label, ..
        } in scale.legend_ticks(legend.tick_count, legend.bar_width)
        {
            let x = legend.bar_x + offset_px;
            frame.push_line(LinePrimitive::new(x, axis_y, x, axis_y + 4.0, 1.0, Color::BLACK));
            frame.push_text(TextPrimitive::new(
                label,
                x,
                axis_y + 4.0 + LEGEND_TICK_FONT_PX,
                LEGEND_TICK_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }

        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_frame()?;
        renderer.render(&frame)
    }

    fn label_for(&self, leaf: &TreemapLeaf, company: &CompanyRecord) -> String {
        if leaf.fits_label(self.config.min_label_width_px) && !company.symbol.is_empty() {
            company.symbol.clone()
        } else {
            self.config.placeholder_label.clone()
        }
    }
}

fn tooltip_lines(company: &CompanyRecord, fill: &CellFill) -> Vec<TooltipLine> {
    let return_color = if company.ytd_return.is_some_and(|value| value < 0.0) {
        fill.diverging.colors().negative
    } else {
        fill.diverging.colors().positive
    };
    let mut lines = vec![
        TooltipLine::plain(format!("Symbol: {}", company.symbol)),
        TooltipLine::plain(format!("Company: {}", company.name)),
        TooltipLine::plain(format!("Weight: {:.2}%", company.weight * 100.0)),
        TooltipLine::plain("Year To Date Price Return:"),
    ];
    if !company.ytd_return_text.is_empty() {
        lines.push(TooltipLine::heading(company.ytd_return_text.clone()).with_color(return_color));
    }
    lines
}
