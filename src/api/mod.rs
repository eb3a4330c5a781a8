mod chart_config;
mod chart_init;
pub mod grid_renderer;
pub mod line_plotter;

pub use chart_config::{ChartConfig, ChartStyles};

use crate::core::ResolvedGeometry;
use crate::render::{Point, Surface};

/// Line chart bound to one drawing surface.
///
/// Geometry is resolved once at construction and the static layers (cells,
/// border, axis ticks and labels) are painted immediately. Each
/// [`Chart::plot`] call then strokes one data line on top of them.
#[derive(Debug)]
pub struct Chart<S: Surface> {
    surface: S,
    config: ChartConfig,
    geometry: ResolvedGeometry,
}

impl<S: Surface> Chart<S> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry(&self) -> &ResolvedGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Pixel position of sample `index` with `value`.
    #[must_use]
    pub fn map_point(&self, index: usize, value: f64) -> Point {
        self.geometry.project(index, value)
    }
}
