use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle, Paint, RenderFrame, Renderer, TextHAlign};

const FONT_FAMILY: &str = "sans-serif";

/// Serializes frames into standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    background: Option<Color>,
    last_document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints the whole surface before any primitive.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.last_document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.last_document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_document = frame_to_svg(frame, self.background)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        Ok(())
    }
}

/// Renders one frame to an SVG string without validation.
pub fn frame_to_svg(
    frame: &RenderFrame,
    background: Option<Color>,
) -> Result<String, std::fmt::Error> {
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    let mut svg = String::new();

    write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    )?;
    if let Some(color) = background {
        write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", color.to_hex())?;
    }

    if !frame.gradients.is_empty() {
        svg.push_str("<defs>");
        for gradient in &frame.gradients {
            write!(svg, "<linearGradient id=\"{}\">", escape_xml(&gradient.id))?;
            for stop in &gradient.stops {
                write!(
                    svg,
                    "<stop offset=\"{:.0}%\" stop-color=\"{}\"{}/>",
                    stop.offset * 100.0,
                    stop.color.to_hex(),
                    opacity_attr("stop-opacity", stop.color)
                )?;
            }
            svg.push_str("</linearGradient>");
        }
        svg.push_str("</defs>");
    }

    for rect in &frame.rects {
        let fill = match &rect.fill {
            Paint::Solid(color) => format!("{}\"{}", color.to_hex(), opacity_attr("fill-opacity", *color)),
            Paint::Gradient(id) => format!("url(#{})\"", escape_xml(id)),
        };
        write!(
            svg,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{fill}",
            rect.x, rect.y, rect.width, rect.height
        )?;
        if rect.corner_radius > 0.0 {
            write!(svg, " rx=\"{0:.2}\" ry=\"{0:.2}\"", rect.corner_radius)?;
        }
        if rect.border_width > 0.0 {
            write!(
                svg,
                " stroke=\"{}\" stroke-width=\"{:.2}\"",
                rect.border_color.to_hex(),
                rect.border_width
            )?;
        }
        svg.push_str("/>");
    }

    for line in &frame.lines {
        write!(
            svg,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"{}{}/>",
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            line.color.to_hex(),
            line.stroke_width,
            opacity_attr("stroke-opacity", line.color),
            dash_attr(line.stroke_style)
        )?;
    }

    for polyline in &frame.polylines {
        let points = polyline
            .points
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            svg,
            "<polyline points=\"{points}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"{}/>",
            polyline.color.to_hex(),
            polyline.stroke_width,
            opacity_attr("stroke-opacity", polyline.color)
        )?;
    }

    for circle in &frame.circles {
        write!(
            svg,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"{}/>",
            circle.cx,
            circle.cy,
            circle.radius,
            circle.fill.to_hex(),
            opacity_attr("fill-opacity", circle.fill)
        )?;
    }

    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\"",
            text.x,
            text.y,
            text.font_size_px,
            text.color.to_hex()
        )?;
        if text.bold {
            svg.push_str(" font-weight=\"bold\"");
        }
        if text.rotation_deg != 0.0 {
            write!(
                svg,
                " transform=\"rotate({} {:.2} {:.2})\"",
                text.rotation_deg, text.x, text.y
            )?;
        }
        write!(svg, ">{}</text>", escape_xml(&text.text))?;
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha < 1.0 {
        format!(" {name}=\"{:.3}\"", color.alpha)
    } else {
        String::new()
    }
}

fn dash_attr(style: LineStrokeStyle) -> &'static str {
    match style {
        LineStrokeStyle::Solid => "",
        LineStrokeStyle::Dotted => " stroke-dasharray=\"1 1\"",
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
