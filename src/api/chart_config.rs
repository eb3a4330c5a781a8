use serde::{Deserialize, Serialize};

use crate::core::{CellsCount, HeightBounds, SizeRequest};
use crate::error::{ChartError, ChartResult};
use crate::render::{DashStyle, StrokeStyle, TextStyle};

/// Style records keyed by the layer they paint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyles {
    #[serde(default)]
    pub cells_line: StrokeStyle,
    #[serde(default)]
    pub border: StrokeStyle,
    #[serde(default)]
    pub dash: DashStyle,
    #[serde(default)]
    pub text: TextStyle,
    #[serde(default)]
    pub line: StrokeStyle,
}

impl ChartStyles {
    pub fn validate(&self) -> ChartResult<()> {
        self.cells_line.validate()?;
        self.border.validate()?;
        self.dash.validate()?;
        self.text.validate()?;
        self.line.validate()
    }
}

/// Public chart bootstrap configuration.
///
/// Field names serialize in camelCase so configs written for canvas-style
/// hosts (`cellsCount`, `stepX`, `cellsLine`, ...) load as-is. The config is
/// never mutated by the chart; resolved values live in
/// [`crate::core::ResolvedGeometry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub cells_count: CellsCount,
    #[serde(default = "default_step")]
    pub step_x: i64,
    #[serde(default = "default_step")]
    pub step_y: i64,
    pub height: HeightBounds,
    #[serde(default)]
    pub styles: ChartStyles,
    /// Draws the inner cell grid.
    #[serde(default)]
    pub cells: bool,
    /// Draws the outer rectangle.
    #[serde(default)]
    pub border: bool,
}

impl ChartConfig {
    /// Creates a config with unit steps, default styles and optional layers off.
    #[must_use]
    pub fn new(cells_count: CellsCount, height: HeightBounds) -> Self {
        Self {
            cells_count,
            step_x: default_step(),
            step_y: default_step(),
            height,
            styles: ChartStyles::default(),
            cells: false,
            border: false,
        }
    }

    #[must_use]
    pub fn with_steps(mut self, step_x: i64, step_y: i64) -> Self {
        self.step_x = step_x;
        self.step_y = step_y;
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: ChartStyles) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn with_cells(mut self, enabled: bool) -> Self {
        self.cells = enabled;
        self
    }

    #[must_use]
    pub fn with_border(mut self, enabled: bool) -> Self {
        self.border = enabled;
        self
    }

    /// Logical inputs of the size search.
    #[must_use]
    pub fn size_request(&self) -> SizeRequest {
        SizeRequest {
            cells_count: self.cells_count,
            step_x: self.step_x,
            step_y: self.step_y,
            height: self.height,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.size_request().validate()?;
        self.styles.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON. Unknown fields are ignored.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_step() -> i64 {
    1
}
