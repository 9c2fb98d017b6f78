//! Tree flattening for point charts.
//!
//! Turns the id-linked taxonomy into parallel arrays where each point refers
//! to its parent by array index, plus per-point color and radius derived
//! from the node's rank.
//!
//! # Module Structure
//!
//! - [`types`]: output shapes, options and the level styling tables
//! - [`collect`]: the flattening pass

mod collect;
mod types;

pub use collect::{
    collect_chart_data, collect_chart_data_with_options, collect_points, level_color,
    point_radius,
};
pub use types::{
    BASE_POINT_RADIUS, ChartData, ChartDataset, ChartNode, ChartOptions, ChartPoint,
    DEFAULT_POINT_COLOR, LEVEL_COLORS, MIN_POINT_RADIUS, RADIUS_STEP,
};
