//! Screen-space geometry: treemap partition and time/value projection.

pub mod cartesian;
pub mod treemap;

pub use cartesian::{
    CURVE_SAMPLES_PER_SEGMENT, CartesianLayout, LineCurve, ProjectedPoint, monotone_x,
};
pub use treemap::{SQUARIFY_RATIO, TreemapConfig, TreemapLayout, TreemapLeaf};
