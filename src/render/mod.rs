mod primitives;
mod recording_surface;
mod style;

pub use primitives::{Color, Point};
pub use recording_surface::{ContextState, RecordingHost, RecordingSurface, SurfaceCall};
pub use style::{
    DashPattern, DashStyle, LineCap, LineJoin, StrokeStyle, TextAlign, TextBaseline, TextStyle,
    apply_stroke, apply_text, effective_dash,
};

use crate::error::ChartResult;

/// Immediate-mode 2-D drawing target.
///
/// Mirrors a raster context: setters mutate persistent state that applies to
/// every later path or text operation until changed again.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_line_dash(&mut self, pattern: &[f64]);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_fill_color(&mut self, color: Color);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point);
    fn stroke(&mut self) -> ChartResult<()>;
    fn fill_text(&mut self, text: &str, at: Point) -> ChartResult<()>;
}

/// Container that owns layout width and hands out drawing targets.
pub trait SurfaceHost {
    type Surface: Surface;

    /// Width in device pixels currently available to the chart.
    fn available_width(&self) -> u32;

    fn create_surface(&mut self, width: u32, height: u32) -> ChartResult<Self::Surface>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoHost, CairoSurface, CairoSurfaceStats};
