use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::Point;

/// Logical span of the index axis (`x`) and the value axis (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellsCount {
    pub x: i64,
    pub y: i64,
}

impl CellsCount {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Aspect bounds expressed as `width / height` limits.
///
/// `min` yields the smallest allowed height (`width / min`), `max` the largest
/// (`width / max`), so a valid config has `min >= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightBounds {
    pub min: f64,
    pub max: f64,
}

impl HeightBounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Logical inputs of the size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRequest {
    pub cells_count: CellsCount,
    pub step_x: i64,
    pub step_y: i64,
    pub height: HeightBounds,
}

impl SizeRequest {
    pub fn validate(&self) -> ChartResult<()> {
        if self.step_x <= 0 || self.step_y <= 0 {
            return Err(ChartError::InvalidConfig(format!(
                "steps must be > 0 (step_x={}, step_y={})",
                self.step_x, self.step_y
            )));
        }
        if self.cells_count.x < 0 || self.cells_count.y < 0 {
            return Err(ChartError::InvalidConfig(format!(
                "cell counts must be >= 0 (x={}, y={})",
                self.cells_count.x, self.cells_count.y
            )));
        }
        for (name, value) in [("min", self.height.min), ("max", self.height.max)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "height.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Pixel layout derived once from a [`SizeRequest`] and the host width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub width: u32,
    pub height: u32,
    pub cell_size: f64,
    pub step_x: i64,
    pub step_y: i64,
    pub cells_x: i64,
    /// Value-axis span after rounding up to a multiple of ten.
    pub cells_y: i64,
}

impl ResolvedGeometry {
    #[must_use]
    pub fn width_px(&self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(&self) -> f64 {
        f64::from(self.height)
    }

    /// Number of grid columns right of the value axis.
    #[must_use]
    pub fn columns(&self) -> i64 {
        self.cells_x / self.step_x
    }

    /// Number of grid rows above the index axis.
    #[must_use]
    pub fn rows(&self) -> i64 {
        self.cells_y / self.step_y
    }

    #[must_use]
    pub fn index_to_x(&self, index: usize) -> f64 {
        self.cell_size + self.cell_size * (index as f64 + 1.0) / self.step_x as f64
    }

    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        self.height_px() - value * self.cell_size / self.step_y as f64 - self.cell_size
    }

    /// Maps sample `index` with `value` to pixel space.
    ///
    /// Index 0 lands one cell right of the value axis and value 0 one cell
    /// above the bottom edge, leaving a label margin on both axes.
    #[must_use]
    pub fn project(&self, index: usize, value: f64) -> Point {
        Point::new(self.index_to_x(index), self.value_to_y(value))
    }
}

/// Rounds a non-negative count up to the nearest multiple of ten.
pub fn round_up_to_ten(count: i64) -> ChartResult<i64> {
    count
        .checked_add(9)
        .map(|padded| padded / 10 * 10)
        .ok_or_else(|| ChartError::InvalidConfig(format!("cell count {count} overflows")))
}

/// Derives cell size and height for `host_width`, searching the smallest
/// vertical step that divides the value span and fits the aspect bounds.
pub fn resolve_geometry(request: &SizeRequest, host_width: u32) -> ChartResult<ResolvedGeometry> {
    if host_width == 0 {
        return Err(ChartError::InvalidViewport {
            width: host_width,
            height: 0,
        });
    }
    request.validate()?;

    let cells_x = request.cells_count.x;
    let cells_y = round_up_to_ten(request.cells_count.y)?;
    let width = f64::from(host_width);
    let cell_size = width / ((cells_x as f64 / request.step_x as f64) + 1.0);
    let min_height = (width / request.height.min).floor();
    let max_height = width / request.height.max;

    // Only divisors of `cells_y` can be accepted, so those are the only steps
    // tried; past `cells_y` nothing divides the span.
    let first_step = request.step_y;
    let last_step = cells_y.max(first_step);

    for step_y in step_candidates(cells_y, first_step) {
        let rows = cells_y as f64 / step_y as f64;
        let candidate = ((rows + 1.0) * cell_size).max(min_height).ceil();
        trace!(step_y, candidate, max_height, "size search candidate");

        if candidate <= max_height {
            if candidate > f64::from(u32::MAX) {
                return Err(ChartError::InvalidConfig(format!(
                    "resolved height {candidate} exceeds surface limits"
                )));
            }
            let geometry = ResolvedGeometry {
                width: host_width,
                height: candidate as u32,
                cell_size,
                step_x: request.step_x,
                step_y,
                cells_x,
                cells_y,
            };
            debug!(
                width = geometry.width,
                height = geometry.height,
                cell_size,
                step_y,
                cells_y,
                "resolved chart geometry"
            );
            return Ok(geometry);
        }
    }

    warn!(
        cells_y,
        first_step, last_step, "size search exhausted without a fitting vertical step"
    );
    Err(ChartError::StepSearchExhausted {
        cells_y,
        first_step,
        last_step,
    })
}

/// Ascending divisors of `span` that are at least `from`. Every step divides
/// an empty span, so `0` yields `from` alone.
fn step_candidates(span: i64, from: i64) -> Vec<i64> {
    if span == 0 {
        return vec![from];
    }

    let mut low = Vec::new();
    let mut high = Vec::new();
    let mut divisor = 1_i64;
    while divisor <= span / divisor {
        if span % divisor == 0 {
            low.push(divisor);
            let paired = span / divisor;
            if paired != divisor {
                high.push(paired);
            }
        }
        divisor += 1;
    }
    low.into_iter()
        .chain(high.into_iter().rev())
        .filter(|step| *step >= from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        CellsCount, HeightBounds, SizeRequest, resolve_geometry, round_up_to_ten, step_candidates,
    };
    use crate::error::ChartError;
    use approx::assert_relative_eq;

    fn request(cells: (i64, i64), steps: (i64, i64), height: (f64, f64)) -> SizeRequest {
        SizeRequest {
            cells_count: CellsCount::new(cells.0, cells.1),
            step_x: steps.0,
            step_y: steps.1,
            height: HeightBounds::new(height.0, height.1),
        }
    }

    #[test]
    fn rounds_value_span_up_to_ten() {
        assert_eq!(round_up_to_ten(0).expect("zero"), 0);
        assert_eq!(round_up_to_ten(1).expect("one"), 10);
        assert_eq!(round_up_to_ten(10).expect("ten"), 10);
        assert_eq!(round_up_to_ten(1233).expect("odd"), 1240);
        assert!(round_up_to_ten(i64::MAX).is_err());
    }

    #[test]
    fn accepts_initial_step_when_it_fits() {
        // 10 columns in 110px -> 10px cells; 10 rows -> 110px, bounds [110/3, 110].
        let geometry =
            resolve_geometry(&request((10, 10), (1, 1), (3.0, 1.0)), 110).expect("geometry");
        assert_relative_eq!(geometry.cell_size, 10.0);
        assert_eq!(geometry.step_y, 1);
        assert_eq!(geometry.height, 110);
        assert_eq!(geometry.rows(), 10);
        assert_eq!(geometry.columns(), 10);
    }

    #[test]
    fn increments_step_until_height_fits_and_divides() {
        // 10px cells, max height 80px: steps 1..=4 are too tall or do not divide 30.
        let geometry =
            resolve_geometry(&request((9, 27), (1, 1), (5.0, 1.25)), 100).expect("geometry");
        assert_eq!(geometry.cells_y, 30);
        assert_eq!(geometry.step_y, 5);
        assert_eq!(geometry.height, 70);
        assert_eq!(geometry.cells_y % geometry.step_y, 0);
    }

    #[test]
    fn floor_of_min_bound_lifts_small_heights() {
        let geometry =
            resolve_geometry(&request((10, 10), (1, 10), (2.0, 1.0)), 110).expect("geometry");
        // One row plus margin is 20px; width / min = 55.
        assert_eq!(geometry.height, 55);
        assert_eq!(geometry.step_y, 10);
    }

    #[test]
    fn rejects_non_positive_steps_and_negative_counts() {
        for bad in [
            request((10, 10), (0, 1), (3.0, 1.0)),
            request((10, 10), (1, -2), (3.0, 1.0)),
            request((-1, 10), (1, 1), (3.0, 1.0)),
            request((10, -10), (1, 1), (3.0, 1.0)),
            request((10, 10), (1, 1), (f64::NAN, 1.0)),
        ] {
            let err = resolve_geometry(&bad, 200).expect_err("invalid request");
            assert!(matches!(err, ChartError::InvalidConfig(_)), "{err}");
        }
    }

    #[test]
    fn unsatisfiable_bounds_exhaust_instead_of_looping() {
        // width / max = 10px but any layout needs at least one 10px+ row plus margin.
        let err = resolve_geometry(&request((10, 10), (1, 1), (20.0, 11.0)), 110)
            .expect_err("no step fits");
        assert!(matches!(
            err,
            ChartError::StepSearchExhausted {
                cells_y: 10,
                first_step: 1,
                last_step: 10
            }
        ));
    }

    #[test]
    fn large_value_span_finds_distant_divisor() {
        // 16 columns in 960px -> 60px cells, max height 640px: at most 9 rows,
        // so the first fitting divisor of 5_000_000 is 625_000 (8 rows).
        let geometry = resolve_geometry(&request((30, 5_000_000), (2, 1), (3.0, 1.5)), 960)
            .expect("geometry");
        assert_eq!(geometry.cells_y, 5_000_000);
        assert_eq!(geometry.step_y, 625_000);
        assert_eq!(geometry.rows(), 8);
        assert_eq!(geometry.height, 540);
    }

    #[test]
    fn step_candidates_are_ascending_divisors_from_start() {
        assert_eq!(step_candidates(30, 1), vec![1, 2, 3, 5, 6, 10, 15, 30]);
        assert_eq!(step_candidates(30, 4), vec![5, 6, 10, 15, 30]);
        assert_eq!(step_candidates(100, 10), vec![10, 20, 25, 50, 100]);
        assert!(step_candidates(10, 11).is_empty());
        assert_eq!(step_candidates(0, 7), vec![7]);
    }

    #[test]
    fn zero_host_width_is_rejected() {
        let err = resolve_geometry(&request((10, 10), (1, 1), (3.0, 1.0)), 0)
            .expect_err("zero width");
        assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
    }

    #[test]
    fn projection_leaves_one_cell_margin() {
        let geometry =
            resolve_geometry(&request((10, 10), (1, 1), (3.0, 1.0)), 110).expect("geometry");
        let origin = geometry.project(0, 0.0);
        assert_relative_eq!(origin.x, 20.0);
        assert_relative_eq!(origin.y, 100.0);
        let top = geometry.project(9, 10.0);
        assert_relative_eq!(top.x, 110.0);
        assert_relative_eq!(top.y, 0.0);
    }
}
