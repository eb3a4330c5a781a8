use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Surface};

/// Dash pattern as alternating on/off lengths in pixels.
pub type DashPattern = SmallVec<[f64; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Horizontal text anchoring relative to the `fill_text` x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical text anchoring relative to the `fill_text` y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

/// Sparse stroke attributes. `None` leaves the surface state untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<DashPattern>,
    #[serde(
        default,
        deserialize_with = "lenient_keyword",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_join: Option<LineJoin>,
    #[serde(
        default,
        deserialize_with = "lenient_keyword",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_cap: Option<LineCap>,
}

impl StrokeStyle {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_dash(mut self, pattern: &[f64]) -> Self {
        self.dash = Some(SmallVec::from_slice(pattern));
        self
    }

    #[must_use]
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = Some(join);
        self
    }

    #[must_use]
    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = Some(cap);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(color) = self.color {
            color.validate()?;
        }
        if let Some(width) = self.width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "stroke width must be finite and > 0".to_owned(),
                ));
            }
        }
        if let Some(opacity) = self.opacity {
            if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
                return Err(ChartError::InvalidData(
                    "stroke opacity must be finite and in [0, 1]".to_owned(),
                ));
            }
        }
        if let Some(dash) = &self.dash {
            if dash.iter().any(|segment| !segment.is_finite() || *segment < 0.0) {
                return Err(ChartError::InvalidData(
                    "dash segments must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Sparse text attributes. `None` leaves the surface state untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(
        default,
        deserialize_with = "lenient_keyword",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_baseline: Option<TextBaseline>,
    #[serde(
        default,
        deserialize_with = "lenient_keyword",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_align: Option<TextAlign>,
}

impl TextStyle {
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    #[must_use]
    pub fn with_text_baseline(mut self, baseline: TextBaseline) -> Self {
        self.text_baseline = Some(baseline);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(color) = self.color {
            color.validate()?;
        }
        if self.font.as_deref().is_some_and(|font| font.trim().is_empty()) {
            return Err(ChartError::InvalidData("font must not be empty".to_owned()));
        }
        Ok(())
    }
}

/// Stroke attributes for axis ticks plus their placement inside a cell.
///
/// A tick runs from `cell_size / length` to `cell_size` away from the chart
/// edge, pushed further inward by `shift * cell_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashStyle {
    #[serde(flatten)]
    pub stroke: StrokeStyle,
    #[serde(default = "default_dash_length")]
    pub length: f64,
    #[serde(default)]
    pub shift: f64,
}

impl Default for DashStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            length: default_dash_length(),
            shift: 0.0,
        }
    }
}

impl DashStyle {
    #[must_use]
    pub fn new(length: f64, shift: f64) -> Self {
        Self {
            length,
            shift,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.length.is_finite() || self.length == 0.0 {
            return Err(ChartError::InvalidData(
                "dash length divisor must be finite and non-zero".to_owned(),
            ));
        }
        if !self.shift.is_finite() {
            return Err(ChartError::InvalidData(
                "dash shift must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

fn default_dash_length() -> f64 {
    2.0
}

/// Reads an optional keyword attribute. Unrecognized keywords are dropped with
/// a warning so the surface keeps its current value, as a canvas does.
fn lenient_keyword<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed: Result<T, serde::de::value::Error> =
        T::deserialize(raw.as_str().into_deserializer());
    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(keyword = %raw, error = %err, "ignoring unrecognized style keyword");
            Ok(None)
        }
    }
}

/// Pattern to hand to a backend: a list of only zero-length segments draws a
/// solid line, so it collapses to the empty pattern.
#[must_use]
pub fn effective_dash(pattern: &[f64]) -> &[f64] {
    if pattern.iter().all(|segment| *segment == 0.0) {
        &[]
    } else {
        pattern
    }
}

/// Writes every present stroke attribute into the surface state.
pub fn apply_stroke<S: Surface + ?Sized>(surface: &mut S, style: &StrokeStyle) {
    if let Some(color) = style.color {
        surface.set_stroke_color(color);
    }
    if let Some(width) = style.width {
        surface.set_line_width(width);
    }
    if let Some(opacity) = style.opacity {
        surface.set_global_alpha(opacity);
    }
    if let Some(dash) = &style.dash {
        surface.set_line_dash(dash);
    }
    if let Some(join) = style.line_join {
        surface.set_line_join(join);
    }
    if let Some(cap) = style.line_cap {
        surface.set_line_cap(cap);
    }
}

/// Writes every present text attribute into the surface state.
pub fn apply_text<S: Surface + ?Sized>(surface: &mut S, style: &TextStyle) {
    if let Some(font) = &style.font {
        surface.set_font(font);
    }
    if let Some(color) = style.color {
        surface.set_fill_color(color);
    }
    if let Some(baseline) = style.text_baseline {
        surface.set_text_baseline(baseline);
    }
    if let Some(align) = style.text_align {
        surface.set_text_align(align);
    }
}
