//! Static chart layers: cell grid, border and axis ticks with labels.

use tracing::trace;

use crate::core::ResolvedGeometry;
use crate::error::ChartResult;
use crate::render::{DashStyle, Point, StrokeStyle, Surface, TextStyle, apply_stroke, apply_text};

/// Strokes the inner grid lines. The lines on the axes themselves (index 0)
/// are left out.
pub fn draw_cells<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &ResolvedGeometry,
    style: &StrokeStyle,
) -> ChartResult<()> {
    apply_stroke(surface, style);

    let cell = geometry.cell_size;
    let width = geometry.width_px();
    let height = geometry.height_px();

    for column in 1..=geometry.columns() {
        let x = column as f64 * cell;
        stroke_segment(surface, Point::new(x, 0.0), Point::new(x, height))?;
    }
    for row in 1..=geometry.rows() {
        let y = row as f64 * cell;
        stroke_segment(surface, Point::new(0.0, y), Point::new(width, y))?;
    }
    trace!(
        columns = geometry.columns(),
        rows = geometry.rows(),
        "cell grid drawn"
    );
    Ok(())
}

/// Strokes the outer rectangle, one side at a time.
pub fn draw_border<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &ResolvedGeometry,
    style: &StrokeStyle,
) -> ChartResult<()> {
    apply_stroke(surface, style);

    let width = geometry.width_px();
    let height = geometry.height_px();
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(0.0, height),
        Point::new(width, height),
        Point::new(width, 0.0),
    ];
    for (index, from) in corners.iter().enumerate() {
        let to = corners[(index + 1) % corners.len()];
        stroke_segment(surface, *from, to)?;
    }
    Ok(())
}

/// Draws one dashed tick and one numeric label per grid line on both axes.
///
/// Ticks on the index axis hang from `cell / length` to `cell` above the
/// bottom edge; ticks on the value axis span the same distances from the left
/// edge. Both are pushed inward by `shift * cell`.
pub fn draw_axis_layer<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &ResolvedGeometry,
    dash: &DashStyle,
    text: &TextStyle,
) -> ChartResult<()> {
    apply_stroke(surface, &dash.stroke);
    apply_text(surface, text);

    let cell = geometry.cell_size;
    let height = geometry.height_px();
    let near = cell / dash.length;
    let shift = cell * dash.shift;

    for column in 0..=geometry.columns() {
        let x = (column + 1) as f64 * cell;
        stroke_segment(
            surface,
            Point::new(x, height - near - shift),
            Point::new(x, height - cell - shift),
        )?;
        let label = (column * geometry.step_x).to_string();
        surface.fill_text(
            &label,
            Point::new(column as f64 * cell + cell / 2.0, height - cell / 2.0),
        )?;
    }

    for row in 0..=geometry.rows() {
        let y = height - (row + 1) as f64 * cell;
        stroke_segment(
            surface,
            Point::new(near + shift, y),
            Point::new(cell + shift, y),
        )?;
        let label = (row * geometry.step_y).to_string();
        surface.fill_text(&label, Point::new(cell / 2.0, y + cell / 2.0))?;
    }
    Ok(())
}

fn stroke_segment<S: Surface + ?Sized>(surface: &mut S, from: Point, to: Point) -> ChartResult<()> {
    surface.begin_path();
    surface.move_to(from);
    surface.line_to(to);
    surface.stroke()
}
