use serde::{Deserialize, Serialize};

use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// One row of tooltip content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipLine {
    pub text: String,
    /// Drawn bold.
    pub emphasis: bool,
    /// Overrides the tooltip text color.
    pub color: Option<Color>,
}

impl TooltipLine {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: false,
            color: None,
        }
    }

    #[must_use]
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: true,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub font_size_px: f64,
    pub line_height_px: f64,
    pub padding_px: f64,
    /// Rough glyph advance used to size the box without a text shaper.
    pub char_width_px: f64,
    pub border_width: f64,
    pub corner_radius: f64,
    pub background: Color,
    pub border_color: Color,
    pub text_color: Color,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            font_size_px: 14.0,
            line_height_px: 18.0,
            padding_px: 5.0,
            char_width_px: 7.5,
            border_width: 2.0,
            corner_radius: 3.0,
            background: Color::WHITE,
            border_color: Color::BLACK,
            text_color: Color::BLACK,
        }
    }
}

/// The single tooltip owned by a chart view.
///
/// Hovering repositions and refills this one instance; nothing ever
/// creates a second tooltip for the same chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    visible: bool,
    x: f64,
    y: f64,
    lines: Vec<TooltipLine>,
}

impl Tooltip {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the box at `anchor + offset` with fresh content.
    pub fn show(&mut self, anchor: (f64, f64), offset: (f64, f64), lines: Vec<TooltipLine>) {
        self.visible = true;
        self.x = anchor.0 + offset.0;
        self.y = anchor.1 + offset.1;
        self.lines = lines;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn lines(&self) -> &[TooltipLine] {
        &self.lines
    }

    /// Emits the box and its text when visible.
    pub fn append_to(&self, frame: &mut RenderFrame, style: TooltipStyle) {
        if !self.visible || self.lines.is_empty() {
            return;
        }

        let longest = self
            .lines
            .iter()
            .map(|line| line.text.chars().count())
            .max()
            .unwrap_or_default();
        let width = longest as f64 * style.char_width_px + 2.0 * style.padding_px;
        let height = self.lines.len() as f64 * style.line_height_px + 2.0 * style.padding_px;
        frame.push_rect(
            RectPrimitive::new(self.x, self.y, width, height, style.background)
                .with_border(style.border_width, style.border_color)
                .with_corner_radius(style.corner_radius),
        );

        for (row, line) in self.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            let baseline =
                self.y + style.padding_px + (row as f64 + 1.0) * style.line_height_px - 4.0;
            let mut text = TextPrimitive::new(
                line.text.clone(),
                self.x + style.padding_px,
                baseline,
                style.font_size_px,
                line.color.unwrap_or(style.text_color),
                TextHAlign::Left,
            );
            if line.emphasis {
                text = text.bold();
            }
            frame.push_text(text);
        }
    }
}
