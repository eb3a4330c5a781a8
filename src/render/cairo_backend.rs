use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LineCap, LineJoin, Point, Surface, SurfaceHost, TextAlign, TextBaseline,
    effective_dash,
};

const DEFAULT_FONT: &str = "10px sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub strokes: usize,
    pub texts: usize,
}

/// Offscreen Cairo + Pango surface with canvas-like state handling.
///
/// Stroke and fill colors are held until the next `stroke`/`fill_text` and
/// combined with the global alpha there, matching raster-context semantics.
pub struct CairoSurface {
    surface: ImageSurface,
    context: Context,
    width: u32,
    height: u32,
    stroke_color: Color,
    fill_color: Color,
    global_alpha: f64,
    font: FontDescription,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    stats: CairoSurfaceStats,
}

impl fmt::Debug for CairoSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CairoSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stroke_color", &self.stroke_color)
            .field("fill_color", &self.fill_color)
            .field("global_alpha", &self.global_alpha)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl CairoSurface {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport { width, height };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let surface_width = i32::try_from(width).map_err(|_| invalid())?;
        let surface_height = i32::try_from(height).map_err(|_| invalid())?;

        let surface = ImageSurface::create(Format::ARgb32, surface_width, surface_height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;

        Ok(Self {
            surface,
            context,
            width,
            height,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            global_alpha: 1.0,
            font: parse_css_font(DEFAULT_FONT),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            stats: CairoSurfaceStats::default(),
        })
    }

    #[must_use]
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn stats(&self) -> CairoSurfaceStats {
        self.stats
    }

    /// Paints the whole surface with `color`, ignoring the global alpha.
    pub fn fill_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        apply_color(&self.context, color, 1.0);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to paint background", err))
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface.flush();
        self.surface
            .write_to_png(writer)
            .map_err(|err| map_backend_error("failed to encode png", err))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| {
            map_backend_error(&format!("failed to create `{}`", path.display()), err)
        })?;
        let mut writer = BufWriter::new(file);
        self.write_png(&mut writer)?;
        writer
            .flush()
            .map_err(|err| map_backend_error("failed to flush png", err))
    }
}

impl Surface for CairoSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha;
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        // Cairo enters an error state on an all-zero pattern.
        self.context.set_dash(effective_dash(pattern), 0.0);
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.context.set_line_join(match join {
            LineJoin::Miter => cairo::LineJoin::Miter,
            LineJoin::Round => cairo::LineJoin::Round,
            LineJoin::Bevel => cairo::LineJoin::Bevel,
        });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.context.set_line_cap(match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_font(&mut self, font: &str) {
        self.font = parse_css_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.text_baseline = baseline;
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, point: Point) {
        self.context.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        self.context.line_to(point.x, point.y);
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.context
            .curve_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.stroke_color, self.global_alpha);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        self.stats.strokes += 1;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point) -> ChartResult<()> {
        if !at.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }

        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&self.font));
        layout.set_text(text);

        let (text_width, text_height) = layout.pixel_size();
        let text_width = f64::from(text_width);
        let text_height = f64::from(text_height);
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        let x = match self.text_align {
            TextAlign::Start | TextAlign::Left => at.x,
            TextAlign::Center => at.x - text_width / 2.0,
            TextAlign::End | TextAlign::Right => at.x - text_width,
        };
        let y = match self.text_baseline {
            TextBaseline::Top | TextBaseline::Hanging => at.y,
            TextBaseline::Middle => at.y - text_height / 2.0,
            TextBaseline::Alphabetic | TextBaseline::Ideographic => at.y - baseline,
            TextBaseline::Bottom => at.y - text_height,
        };

        // The caller's current path survives the text draw.
        let caller_path = self
            .context
            .copy_path()
            .map_err(|err| map_backend_error("failed to copy path", err))?;
        self.context.new_path();
        apply_color(&self.context, self.fill_color, self.global_alpha);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        self.context.append_path(&caller_path);

        self.stats.texts += 1;
        Ok(())
    }
}

/// Host with a fixed layout width that produces [`CairoSurface`]s, optionally
/// pre-painted with a background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CairoHost {
    width: u32,
    background: Option<Color>,
}

impl CairoHost {
    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self {
            width,
            background: None,
        }
    }

    #[must_use]
    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl SurfaceHost for CairoHost {
    type Surface = CairoSurface;

    fn available_width(&self) -> u32 {
        self.width
    }

    fn create_surface(&mut self, width: u32, height: u32) -> ChartResult<CairoSurface> {
        let mut surface = CairoSurface::new(width, height)?;
        if let Some(color) = self.background {
            surface.fill_background(color)?;
        }
        Ok(surface)
    }
}

/// Converts a CSS font shorthand such as `"bold 12px sans-serif"` into a Pango
/// description. Unrecognized tokens are ignored.
fn parse_css_font(font: &str) -> FontDescription {
    let mut description = FontDescription::new();
    let mut family: Vec<&str> = Vec::new();
    let mut size_px: Option<f64> = None;

    for token in font.split_whitespace() {
        if size_px.is_some() {
            family.push(token);
            continue;
        }
        match token {
            "bold" | "bolder" => description.set_weight(pango::Weight::Bold),
            "lighter" => description.set_weight(pango::Weight::Light),
            "italic" | "oblique" => description.set_style(pango::Style::Italic),
            _ => {
                let size = token.split('/').next().unwrap_or(token);
                if let Some(value) = size
                    .strip_suffix("px")
                    .and_then(|value| value.parse::<f64>().ok())
                {
                    size_px = Some(value);
                }
            }
        }
    }

    let family = family.join(" ");
    let family = family.trim_matches(|c| c == '"' || c == '\'');
    description.set_family(if family.is_empty() { "sans-serif" } else { family });
    description.set_absolute_size(size_px.unwrap_or(10.0) * f64::from(pango::SCALE));
    description
}

fn apply_color(context: &Context, color: Color, global_alpha: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * global_alpha);
}

fn map_backend_error(prefix: &str, err: impl fmt::Display) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
