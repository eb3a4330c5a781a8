use tracing::{debug, warn};

use crate::core::{LineMode, LinePath, PathCommand, build_line_path};
use crate::error::ChartResult;
use crate::render::{StrokeStyle, Surface, apply_stroke};

use super::Chart;

impl<S: Surface> Chart<S> {
    /// Strokes `series` over the prepared grid using the `line` style.
    ///
    /// Earlier layers stay untouched; calling this repeatedly draws one line
    /// per call. An empty series draws nothing.
    pub fn plot(&mut self, series: &[f64], mode: LineMode) -> ChartResult<()> {
        let path = build_line_path(series, mode, &self.geometry)?;
        debug!(
            samples = series.len(),
            %mode,
            commands = path.len(),
            "plot data line"
        );
        stroke_line_path(&mut self.surface, &path, &self.config.styles.line)
    }

    /// Like [`Chart::plot`] with the mode given by name (`"straight"` or
    /// `"bezier"`). Unknown names fail before anything is drawn.
    pub fn plot_named(&mut self, series: &[f64], mode: &str) -> ChartResult<()> {
        let mode = mode.parse::<LineMode>().inspect_err(|err| {
            warn!(error = %err, "rejected line mode");
        })?;
        self.plot(series, mode)
    }

    /// Path `plot` would stroke for `series`, without drawing it.
    pub fn line_path(&self, series: &[f64], mode: LineMode) -> ChartResult<LinePath> {
        build_line_path(series, mode, &self.geometry)
    }
}

/// Replays `path` as a single stroked subpath after applying `style`.
pub fn stroke_line_path<S: Surface + ?Sized>(
    surface: &mut S,
    path: &LinePath,
    style: &StrokeStyle,
) -> ChartResult<()> {
    if path.is_empty() {
        return Ok(());
    }

    apply_stroke(surface, style);
    surface.begin_path();
    for command in path.iter() {
        match *command {
            PathCommand::MoveTo(point) => surface.move_to(point),
            PathCommand::LineTo(point) => surface.line_to(point),
            PathCommand::CurveTo {
                control1,
                control2,
                end,
            } => surface.bezier_curve_to(control1, control2, end),
        }
    }
    surface.stroke()
}
