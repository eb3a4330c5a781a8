use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ResolvedGeometry;
use crate::error::{ChartError, ChartResult};
use crate::render::Point;

/// Strategy used to connect projected samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    /// Polyline through every sample.
    Straight,
    /// Eased cubic curve through one representative per `step_x` bin.
    Bezier,
}

impl LineMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Bezier => "bezier",
        }
    }
}

impl fmt::Display for LineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineMode {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        match raw {
            "straight" => Ok(Self::Straight),
            "bezier" => Ok(Self::Bezier),
            other => Err(ChartError::UnsupportedLineMode(other.to_owned())),
        }
    }
}

/// One path-building step in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl PathCommand {
    /// Point where the pen rests after this command.
    #[must_use]
    pub fn end_point(self) -> Point {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => point,
            Self::CurveTo { end, .. } => end,
        }
    }
}

/// Data line geometry ready to be replayed onto a surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub commands: Vec<PathCommand>,
}

impl LinePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathCommand> {
        self.commands.iter()
    }

    /// Pen positions in drawing order, control points excluded.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point> {
        self.commands.iter().map(|command| command.end_point()).collect()
    }
}

/// Rejects samples that cannot be placed on the value axis.
pub fn validate_series(series: &[f64]) -> ChartResult<()> {
    if let Some((index, value)) = series
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        return Err(ChartError::InvalidData(format!(
            "sample {index} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

/// Builds the pixel path of `series` for `mode` over `geometry`.
///
/// Pure and deterministic so rendering and tests consume the same output.
/// An empty series yields an empty path.
pub fn build_line_path(
    series: &[f64],
    mode: LineMode,
    geometry: &ResolvedGeometry,
) -> ChartResult<LinePath> {
    validate_series(series)?;
    if series.is_empty() {
        return Ok(LinePath::default());
    }

    let commands = match mode {
        LineMode::Straight => straight_commands(series, geometry),
        LineMode::Bezier => bezier_commands(series, geometry),
    };
    Ok(LinePath { commands })
}

fn straight_commands(series: &[f64], geometry: &ResolvedGeometry) -> Vec<PathCommand> {
    series
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let point = geometry.project(index, *value);
            if index == 0 {
                PathCommand::MoveTo(point)
            } else {
                PathCommand::LineTo(point)
            }
        })
        .collect()
}

fn bezier_commands(series: &[f64], geometry: &ResolvedGeometry) -> Vec<PathCommand> {
    let bin_size = usize::try_from(geometry.step_x).unwrap_or(1).max(1);
    let last_index = series.len() - 1;

    let mut start = geometry.project(0, series[0]);
    let mut commands = Vec::with_capacity(series.len() / bin_size + 2);
    commands.push(PathCommand::MoveTo(start));

    for bin_start in (bin_size..series.len()).step_by(bin_size) {
        let bin = &series[bin_start..(bin_start + bin_size).min(series.len())];
        let (min, max) = bin
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(*value), max.max(*value))
            });

        // Keep heading the same way as the previous segment: fall to the bin
        // minimum only when it sits below the current pen position.
        let representative = if geometry.value_to_y(min) > start.y {
            min
        } else {
            max
        };
        let next = geometry.project(bin_start, representative);
        commands.push(eased_curve(start, next));
        start = next;
    }

    if last_index % bin_size != 0 {
        let next = geometry.project(last_index, series[last_index]);
        commands.push(eased_curve(start, next));
    }

    commands
}

/// Cubic segment with control points at one and two thirds of the horizontal
/// span, pinned to the start and end heights respectively.
fn eased_curve(start: Point, end: Point) -> PathCommand {
    let dx = end.x - start.x;
    PathCommand::CurveTo {
        control1: Point::new(start.x + dx / 3.0, start.y),
        control2: Point::new(start.x + 2.0 * dx / 3.0, end.y),
        end,
    }
}
