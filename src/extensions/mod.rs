//! Overlays drawn on top of chart series.

pub mod annotations;

pub use annotations::{
    AnnotationSpec, AnnotationStyle, PlacedAnnotation, append_annotations, historical_events,
    investment_annotations, resolve_annotations,
};
