use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DashPattern, LineCap, LineJoin, Point, Surface, SurfaceHost, TextAlign, TextBaseline,
};

/// One call received by a [`RecordingSurface`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetStrokeColor(Color),
    SetLineWidth(f64),
    SetGlobalAlpha(f64),
    SetLineDash(DashPattern),
    SetLineJoin(LineJoin),
    SetLineCap(LineCap),
    SetFillColor(Color),
    SetFont(String),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    BezierCurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Stroke,
    FillText {
        text: String,
        at: Point,
    },
}

/// Drawing state as a raster context would hold it after the recorded calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextState {
    pub stroke_color: Color,
    pub fill_color: Color,
    pub line_width: f64,
    pub global_alpha: f64,
    pub line_dash: DashPattern,
    pub line_join: LineJoin,
    pub line_cap: LineCap,
    pub font: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
            line_dash: SmallVec::new(),
            line_join: LineJoin::Miter,
            line_cap: LineCap::Butt,
            font: "10px sans-serif".to_owned(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Headless surface used by tests, benches and dry runs.
///
/// Every call is recorded verbatim and the context state is tracked, so callers
/// can assert on exact geometry. Stroke and text calls still validate their
/// input so non-finite coordinates surface as errors.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: ContextState,
    calls: Vec<SurfaceCall>,
    path_is_finite: bool,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: ContextState::default(),
            calls: Vec::new(),
            path_is_finite: true,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ContextState {
        &self.state
    }

    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Drops recorded calls while keeping the context state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Stroke))
            .count()
    }

    /// Labels drawn so far, paired with their anchor point.
    #[must_use]
    pub fn texts(&self) -> Vec<(&str, Point)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::FillText { text, at } => Some((text.as_str(), *at)),
                _ => None,
            })
            .collect()
    }

    fn track_point(&mut self, point: Point) {
        self.path_is_finite &= point.is_finite();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
        self.calls.push(SurfaceCall::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.calls.push(SurfaceCall::SetLineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.global_alpha = alpha;
        self.calls.push(SurfaceCall::SetGlobalAlpha(alpha));
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.state.line_dash = SmallVec::from_slice(pattern);
        self.calls
            .push(SurfaceCall::SetLineDash(SmallVec::from_slice(pattern)));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
        self.calls.push(SurfaceCall::SetLineJoin(join));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
        self.calls.push(SurfaceCall::SetLineCap(cap));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
        self.calls.push(SurfaceCall::SetFillColor(color));
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_owned();
        self.calls.push(SurfaceCall::SetFont(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
        self.calls.push(SurfaceCall::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
        self.calls.push(SurfaceCall::SetTextBaseline(baseline));
    }

    fn begin_path(&mut self) {
        self.path_is_finite = true;
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.track_point(point);
        self.calls.push(SurfaceCall::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.track_point(point);
        self.calls.push(SurfaceCall::LineTo(point));
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.track_point(control1);
        self.track_point(control2);
        self.track_point(end);
        self.calls.push(SurfaceCall::BezierCurveTo {
            control1,
            control2,
            end,
        });
    }

    fn stroke(&mut self) -> ChartResult<()> {
        if !self.path_is_finite {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.calls.push(SurfaceCall::Stroke);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point) -> ChartResult<()> {
        if text.is_empty() {
            return Err(ChartError::InvalidData(
                "text must not be empty".to_owned(),
            ));
        }
        if !at.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.calls.push(SurfaceCall::FillText {
            text: text.to_owned(),
            at,
        });
        Ok(())
    }
}

/// Host with a fixed layout width that produces [`RecordingSurface`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingHost {
    width: u32,
}

impl RecordingHost {
    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self { width }
    }
}

impl SurfaceHost for RecordingHost {
    type Surface = RecordingSurface;

    fn available_width(&self) -> u32 {
        self.width
    }

    fn create_surface(&mut self, width: u32, height: u32) -> ChartResult<RecordingSurface> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport { width, height });
        }
        Ok(RecordingSurface::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingHost, RecordingSurface};
    use crate::error::ChartError;
    use crate::render::{Point, Surface, SurfaceHost};

    #[test]
    fn stroke_rejects_non_finite_path() {
        let mut surface = RecordingSurface::new(50, 50);
        surface.begin_path();
        surface.move_to(Point::new(0.0, 0.0));
        surface.line_to(Point::new(f64::NAN, 3.0));
        assert!(matches!(surface.stroke(), Err(ChartError::InvalidData(_))));

        surface.begin_path();
        surface.move_to(Point::new(0.0, 0.0));
        surface.line_to(Point::new(1.0, 3.0));
        surface.stroke().expect("finite path strokes");
        assert_eq!(surface.stroke_count(), 1);
    }

    #[test]
    fn host_rejects_zero_sized_surfaces() {
        let mut host = RecordingHost::new(0);
        let err = host.create_surface(0, 10).expect_err("zero width must fail");
        assert!(matches!(
            err,
            ChartError::InvalidViewport {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn clear_calls_keeps_state() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.set_line_width(4.0);
        surface.clear_calls();
        assert!(surface.calls().is_empty());
        assert_eq!(surface.state().line_width, 4.0);
    }
}
