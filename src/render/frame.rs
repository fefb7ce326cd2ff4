use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LineStrokeStyle, LinePrimitive, LinearGradient, Paint, PolylinePrimitive,
    RectPrimitive, TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Rebuilt from chart state on every pass; backends draw gradients first,
/// then rects, lines, polylines, circles and texts in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    #[serde(default)]
    pub gradients: Vec<LinearGradient>,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    #[serde(default)]
    pub polylines: Vec<PolylinePrimitive>,
    #[serde(default)]
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            gradients: Vec::new(),
            rects: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.circles.push(circle);
    }

    pub fn push_polyline(&mut self, polyline: PolylinePrimitive) {
        self.polylines.push(polyline);
    }

    pub fn push_gradient(&mut self, gradient: LinearGradient) {
        self.gradients.push(gradient);
    }

    #[must_use]
    pub fn gradient(&self, id: &str) -> Option<&LinearGradient> {
        self.gradients.iter().find(|gradient| gradient.id == id)
    }

    #[must_use]
    pub fn dotted_line_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.stroke_style == LineStrokeStyle::Dotted)
            .count()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for gradient in &self.gradients {
            gradient.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
            if let Paint::Gradient(id) = &rect.fill {
                if self.gradient(id).is_none() {
                    return Err(ChartError::InvalidData(format!(
                        "rect references unknown gradient `{id}`"
                    )));
                }
            }
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.polylines.is_empty()
            && self.circles.is_empty()
    }
}
