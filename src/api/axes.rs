use crate::core::PlotArea;
use crate::core::primitives::{format_compact, format_grouped, format_year};
use crate::layout::CartesianLayout;
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, RenderFrame, TextHAlign, TextPrimitive,
};

const TICK_LENGTH_PX: f64 = 6.0;
const TICK_FONT_PX: f64 = 10.0;
const TITLE_FONT_PX: f64 = 14.0;
const HEADING_FONT_PX: f64 = 18.0;

/// Colors and titles shared by the two time-series charts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisDecor<'a> {
    pub area: PlotArea,
    pub axis_color: Color,
    pub grid_color: Color,
    pub heading: &'a str,
    pub x_title: &'a str,
    pub y_title: &'a str,
    pub year_tick_step: u32,
    pub value_tick_count: usize,
}

/// Dotted horizontal grid, both axes with tick labels and the axis titles.
pub(crate) fn append_axes(frame: &mut RenderFrame, layout: CartesianLayout, decor: AxisDecor<'_>) {
    let left = decor.area.margins.left;
    let top = decor.area.margins.top;
    let width = decor.area.plot.width_px();
    let height = decor.area.plot.height_px();
    let bottom = top + height;

    for (value, y) in layout.value_ticks(decor.value_tick_count) {
        let y = top + y;
        frame.push_line(
            LinePrimitive::new(left, y, left + width, y, 1.0, decor.grid_color)
                .with_stroke_style(LineStrokeStyle::Dotted),
        );
        frame.push_line(LinePrimitive::new(
            left - TICK_LENGTH_PX,
            y,
            left,
            y,
            1.0,
            decor.axis_color,
        ));
        frame.push_text(TextPrimitive::new(
            format_tick(value),
            left - TICK_LENGTH_PX - 3.0,
            y + TICK_FONT_PX / 3.0,
            TICK_FONT_PX,
            decor.axis_color,
            TextHAlign::Right,
        ));
    }
    frame.push_line(LinePrimitive::new(left, top, left, bottom, 1.0, decor.axis_color));

    for (date, x) in layout.year_ticks(decor.year_tick_step) {
        let x = left + x;
        frame.push_line(LinePrimitive::new(
            x,
            bottom,
            x,
            bottom + TICK_LENGTH_PX,
            1.0,
            decor.axis_color,
        ));
        frame.push_text(TextPrimitive::new(
            format_year(date),
            x,
            bottom + TICK_LENGTH_PX + TICK_FONT_PX + 2.0,
            TICK_FONT_PX,
            decor.axis_color,
            TextHAlign::Center,
        ));
    }
    frame.push_line(LinePrimitive::new(
        left,
        bottom,
        left + width,
        bottom,
        1.0,
        decor.axis_color,
    ));

    if !decor.heading.is_empty() && top > HEADING_FONT_PX {
        frame.push_text(
            TextPrimitive::new(
                decor.heading,
                left + width / 2.0,
                HEADING_FONT_PX + 4.0,
                HEADING_FONT_PX,
                decor.axis_color,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
    if !decor.x_title.is_empty() {
        frame.push_text(TextPrimitive::new(
            decor.x_title,
            left + width / 2.0,
            bottom + decor.area.margins.bottom * 0.7,
            TITLE_FONT_PX,
            decor.axis_color,
            TextHAlign::Center,
        ));
    }
    if !decor.y_title.is_empty() {
        frame.push_text(
            TextPrimitive::new(
                decor.y_title,
                20.0,
                top + height / 2.0,
                TITLE_FONT_PX,
                decor.axis_color,
                TextHAlign::Center,
            )
            .rotated(-90.0),
        );
    }
}

/// `1,500` for whole values, up to two decimals otherwise.
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        let grouped = format_grouped(value);
        grouped.trim_end_matches(".00").to_owned()
    } else {
        format_compact(value)
    }
}
