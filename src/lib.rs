//! gridline-chart: cell-grid line chart engine.
//!
//! A chart resolves its pixel geometry once from a logical cell count and the
//! host width, paints the grid, border and axis layers, and then strokes data
//! lines (straight or bin-smoothed bezier) on any [`render::Surface`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartStyles};
pub use crate::core::LineMode;
pub use error::{ChartError, ChartResult};
