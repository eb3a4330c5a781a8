use gridline_chart::core::{CellsCount, HeightBounds};
use gridline_chart::render::{
    Color, DashStyle, LineCap, RecordingHost, RecordingSurface, StrokeStyle, Surface,
    SurfaceCall, TextAlign,
};
use gridline_chart::{Chart, ChartConfig, ChartError, ChartStyles, LineMode};

fn demo_config() -> ChartConfig {
    ChartConfig::from_json_str(include_str!("../demos/chart_config.json")).expect("demo config")
}

fn small_config() -> ChartConfig {
    ChartConfig::new(CellsCount::new(10, 10), HeightBounds::new(3.0, 1.0))
}

#[test]
fn demo_config_resolves_smallest_dividing_step() {
    let mut host = RecordingHost::new(960);
    let chart = Chart::new(&mut host, demo_config()).expect("chart init");

    let geometry = chart.geometry();
    assert_eq!(geometry.cells_y, 1240);
    assert_eq!(geometry.cell_size, 60.0);
    assert_eq!(geometry.step_y, 155);
    assert_eq!(geometry.height, 540);
    assert_eq!(chart.surface().height(), 540);

    // The caller's config is never rewritten.
    assert_eq!(chart.config().cells_count.y, 1234);
    assert_eq!(chart.config().step_y, 1);
}

#[test]
fn construction_paints_cells_and_axis_layers() {
    let mut host = RecordingHost::new(960);
    let chart = Chart::new(&mut host, demo_config()).expect("chart init");
    let surface = chart.surface();

    // 15 columns + 8 rows of cells, 16 + 9 ticks; border disabled.
    assert_eq!(surface.stroke_count(), 15 + 8 + 16 + 9);
    assert_eq!(surface.texts().len(), 16 + 9);
    assert_eq!(surface.texts()[15].0, "30");
    assert_eq!(surface.texts()[24].0, "1240");

    let state = surface.state();
    assert_eq!(state.text_align, TextAlign::Center);
    assert_eq!(state.stroke_color, Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(state.line_cap, LineCap::Butt);
    assert_eq!(state.line_width, 3.0);
}

#[test]
fn border_layer_is_optional() {
    let mut plain_host = RecordingHost::new(110);
    let plain = Chart::new(&mut plain_host, small_config()).expect("plain chart");

    let mut bordered_host = RecordingHost::new(110);
    let bordered =
        Chart::new(&mut bordered_host, small_config().with_border(true)).expect("border chart");

    assert_eq!(
        bordered.surface().stroke_count(),
        plain.surface().stroke_count() + 4
    );
}

#[test]
fn plot_strokes_one_path_with_line_style() {
    let styles = ChartStyles {
        line: StrokeStyle::default()
            .with_color(Color::rgb(0.0, 0.5, 0.0))
            .with_width(3.0),
        ..ChartStyles::default()
    };
    let mut host = RecordingHost::new(110);
    let mut chart = Chart::new(&mut host, small_config().with_styles(styles)).expect("chart");
    let before = chart.surface().calls().len();

    chart
        .plot(&[0.0, 0.0, 0.0], LineMode::Straight)
        .expect("plot");

    let surface = chart.surface();
    let new_calls = &surface.calls()[before..];
    assert_eq!(
        new_calls,
        &[
            SurfaceCall::SetStrokeColor(Color::rgb(0.0, 0.5, 0.0)),
            SurfaceCall::SetLineWidth(3.0),
            SurfaceCall::BeginPath,
            SurfaceCall::MoveTo(chart.map_point(0, 0.0)),
            SurfaceCall::LineTo(chart.map_point(1, 0.0)),
            SurfaceCall::LineTo(chart.map_point(2, 0.0)),
            SurfaceCall::Stroke,
        ]
    );
}

#[test]
fn repeated_plots_keep_earlier_layers() {
    let mut host = RecordingHost::new(110);
    let mut chart = Chart::new(&mut host, small_config().with_cells(true)).expect("chart");
    let static_calls = chart.surface().calls().to_vec();
    let static_strokes = chart.surface().stroke_count();

    chart.plot(&[1.0, 4.0, 2.0], LineMode::Straight).expect("first");
    chart.plot(&[5.0, 3.0, 8.0], LineMode::Bezier).expect("second");

    let surface: RecordingSurface = chart.into_surface();
    assert_eq!(&surface.calls()[..static_calls.len()], static_calls.as_slice());
    assert_eq!(surface.stroke_count(), static_strokes + 2);
}

#[test]
fn unknown_mode_is_rejected_without_drawing() {
    let mut host = RecordingHost::new(110);
    let mut chart = Chart::new(&mut host, small_config()).expect("chart");
    let before = chart.surface().calls().len();

    let err = chart
        .plot_named(&[1.0, 2.0], "spline")
        .expect_err("unknown mode");
    assert!(matches!(err, ChartError::UnsupportedLineMode(ref mode) if mode == "spline"));
    assert_eq!(chart.surface().calls().len(), before);

    chart.plot_named(&[1.0, 2.0], "bezier").expect("known mode");
    assert!(chart.surface().calls().len() > before);
}

#[test]
fn invalid_series_leaves_surface_untouched() {
    let mut host = RecordingHost::new(110);
    let mut chart = Chart::new(&mut host, small_config()).expect("chart");
    let before = chart.surface().calls().len();

    let err = chart
        .plot(&[1.0, -3.0], LineMode::Straight)
        .expect_err("negative sample");
    assert!(matches!(err, ChartError::InvalidData(_)));
    chart.plot(&[], LineMode::Bezier).expect("empty series is a no-op");
    assert_eq!(chart.surface().calls().len(), before);
}

#[test]
fn invalid_config_fails_before_surface_creation() {
    let mut host = RecordingHost::new(110);
    let err = Chart::new(&mut host, small_config().with_steps(0, 1)).expect_err("zero step");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let styles = ChartStyles {
        dash: DashStyle::new(0.0, 0.0),
        ..ChartStyles::default()
    };
    let err = Chart::new(&mut host, small_config().with_styles(styles)).expect_err("bad dash");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
