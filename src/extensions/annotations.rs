use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::InvestmentPoint;
use crate::core::primitives::{format_currency, format_year};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Dated;
use crate::layout::ProjectedPoint;
use crate::render::{Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// A callout pinned to the data point on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub label: String,
    pub dx: f64,
    pub dy: f64,
}

impl AnnotationSpec {
    #[must_use]
    pub fn new(id: impl Into<String>, date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            title: title.into(),
            label: String::new(),
            dx: 0.0,
            dy: 0.0,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }
}

/// An annotation whose anchor was found in the loaded series.
///
/// Anchor coordinates are plot-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAnnotation {
    pub id: String,
    pub title: String,
    pub label: String,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl PlacedAnnotation {
    #[must_use]
    pub fn note_point(&self) -> (f64, f64) {
        (self.anchor_x + self.dx, self.anchor_y + self.dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub title_font_px: f64,
    pub label_font_px: f64,
    pub char_width_px: f64,
    pub line_gap_px: f64,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: 1.0,
            title_font_px: 12.0,
            label_font_px: 11.0,
            char_width_px: 6.5,
            line_gap_px: 4.0,
        }
    }
}

impl AnnotationStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.stroke_width, "stroke_width"),
            (self.title_font_px, "title_font_px"),
            (self.label_font_px, "label_font_px"),
            (self.char_width_px, "char_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::Config(format!(
                    "annotation style `{name}` must be finite and > 0"
                )));
            }
        }
        self.color.validate()?;
        Ok(self)
    }
}

/// Market events called out on the historical index chart.
#[must_use]
pub fn historical_events() -> Vec<AnnotationSpec> {
    [
        ("covid", (2020, 2, 29), "COVID-19 Pandemic", (0.0, 100.0)),
        ("gfc", (2009, 1, 31), "Global Financial Crisis", (60.0, 15.0)),
        ("dotcom-peak", (2000, 7, 31), "Dotcom Bubble Peak", (0.0, -120.0)),
        ("dotcom-burst", (2003, 1, 31), "Dotcom Bubble Burst", (-40.0, 35.0)),
        ("housing-boom", (2007, 6, 30), "Housing Market Boom", (0.0, -110.0)),
        (
            "inflation-war",
            (2022, 1, 31),
            "Inflation, Ukraine Russia War",
            (20.0, 180.0),
        ),
    ]
    .into_iter()
    .filter_map(|(id, (year, month, day), title, (dx, dy))| {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| AnnotationSpec::new(id, date, title).with_offset(dx, dy))
    })
    .collect()
}

/// Start and end callouts for a simulated investment series.
#[must_use]
pub fn investment_annotations(points: &[InvestmentPoint]) -> Vec<AnnotationSpec> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    vec![
        AnnotationSpec::new("initial", first.year, "Initial Investment:")
            .with_label(format_currency(first.value))
            .with_offset(80.0, -100.0),
        AnnotationSpec::new(
            "final",
            last.year,
            format!("Investment Value in {}:", format_year(last.year)),
        )
        .with_label(format_currency(last.value))
        .with_offset(-80.0, -30.0),
    ]
}

/// Pins each spec to the point sharing its exact calendar date.
///
/// `series` must be sorted by date. Specs without a matching point are
/// omitted.
pub fn resolve_annotations<T, F>(
    specs: &[AnnotationSpec],
    series: &[T],
    project: F,
) -> Vec<PlacedAnnotation>
where
    T: Dated,
    F: Fn(&T) -> ProjectedPoint,
{
    specs
        .iter()
        .filter_map(|spec| {
            let Ok(index) = series.binary_search_by_key(&spec.date, Dated::date) else {
                debug!(id = %spec.id, date = %spec.date, "annotation target missing; skipped");
                return None;
            };
            let anchor = project(&series[index]);
            Some(PlacedAnnotation {
                id: spec.id.clone(),
                title: spec.title.clone(),
                label: spec.label.clone(),
                anchor_x: anchor.x,
                anchor_y: anchor.y,
                dx: spec.dx,
                dy: spec.dy,
            })
        })
        .collect()
}

/// Connector, underline, bold title and optional label for each callout.
///
/// `origin` is the surface position of the plot's top-left corner.
pub fn append_annotations(
    frame: &mut RenderFrame,
    placed: &[PlacedAnnotation],
    origin: (f64, f64),
    style: AnnotationStyle,
) {
    for annotation in placed {
        let anchor_x = origin.0 + annotation.anchor_x;
        let anchor_y = origin.1 + annotation.anchor_y;
        let (note_x, note_y) = (anchor_x + annotation.dx, anchor_y + annotation.dy);

        if annotation.dx != 0.0 || annotation.dy != 0.0 {
            frame.push_line(LinePrimitive::new(
                anchor_x,
                anchor_y,
                note_x,
                note_y,
                style.stroke_width,
                style.color,
            ));
        }

        let text_len = annotation
            .title
            .chars()
            .count()
            .max(annotation.label.chars().count());
        let underline = text_len as f64 * style.char_width_px;
        let (underline_end, align) = if annotation.dx < 0.0 {
            (note_x - underline, TextHAlign::Right)
        } else {
            (note_x + underline, TextHAlign::Left)
        };
        frame.push_line(LinePrimitive::new(
            note_x,
            note_y,
            underline_end,
            note_y,
            style.stroke_width,
            style.color,
        ));

        // Notes hanging below the anchor read downward from the underline.
        let below = annotation.dy > 0.0;
        let title_y = if below {
            note_y + style.line_gap_px + style.title_font_px
        } else if annotation.label.is_empty() {
            note_y - style.line_gap_px
        } else {
            note_y - 2.0 * style.line_gap_px - style.label_font_px
        };
        if !annotation.title.is_empty() {
            frame.push_text(
                TextPrimitive::new(
                    annotation.title.clone(),
                    note_x,
                    title_y,
                    style.title_font_px,
                    style.color,
                    align,
                )
                .bold(),
            );
        }
        if !annotation.label.is_empty() {
            let label_y = if below {
                title_y + style.line_gap_px + style.label_font_px
            } else {
                note_y - style.line_gap_px
            };
            frame.push_text(TextPrimitive::new(
                annotation.label.clone(),
                note_x,
                label_y,
                style.label_font_px,
                style.color,
                align,
            ));
        }
    }
}
