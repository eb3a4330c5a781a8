use tracing::debug;

use crate::core::resolve_geometry;
use crate::error::{ChartError, ChartResult};
use crate::render::{Surface, SurfaceHost};

use super::{Chart, ChartConfig, grid_renderer};

impl<S: Surface> Chart<S> {
    /// Resolves geometry for the host width, creates the surface and paints
    /// the static layers.
    pub fn new<H>(host: &mut H, config: ChartConfig) -> ChartResult<Self>
    where
        H: SurfaceHost<Surface = S>,
    {
        config.validate()?;

        let geometry = resolve_geometry(&config.size_request(), host.available_width())?;
        let surface = host.create_surface(geometry.width, geometry.height)?;
        if surface.width() != geometry.width || surface.height() != geometry.height {
            return Err(ChartError::InvalidViewport {
                width: surface.width(),
                height: surface.height(),
            });
        }

        let mut chart = Self {
            surface,
            config,
            geometry,
        };
        chart.draw_static_layers()?;
        Ok(chart)
    }

    fn draw_static_layers(&mut self) -> ChartResult<()> {
        let styles = &self.config.styles;
        debug!(
            cells = self.config.cells,
            border = self.config.border,
            columns = self.geometry.columns(),
            rows = self.geometry.rows(),
            "draw static layers"
        );

        if self.config.cells {
            grid_renderer::draw_cells(&mut self.surface, &self.geometry, &styles.cells_line)?;
        }
        if self.config.border {
            grid_renderer::draw_border(&mut self.surface, &self.geometry, &styles.border)?;
        }
        grid_renderer::draw_axis_layer(&mut self.surface, &self.geometry, &styles.dash, &styles.text)
    }
}
