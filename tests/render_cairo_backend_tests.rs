#![cfg(feature = "cairo-backend")]

use gridline_chart::core::{CellsCount, HeightBounds};
use gridline_chart::render::{CairoHost, CairoSurface, Color, Surface};
use gridline_chart::{Chart, ChartConfig, ChartError, LineMode};

fn config() -> ChartConfig {
    ChartConfig::from_json_str(include_str!("../demos/chart_config.json")).expect("demo config")
}

#[test]
fn cairo_surface_rejects_invalid_size() {
    let err = CairoSurface::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
}

#[test]
fn cairo_chart_draws_static_layers_and_line() {
    let mut host = CairoHost::new(960).with_background(Color::WHITE);
    let mut chart = Chart::new(&mut host, config()).expect("chart init");
    assert_eq!(chart.surface().stats().strokes, 15 + 8 + 16 + 9);
    assert_eq!(chart.surface().stats().texts, 16 + 9);

    let series: Vec<f64> =
        serde_json::from_str(include_str!("../demos/series.json")).expect("series");
    chart.plot(&series, LineMode::Bezier).expect("bezier plot");
    chart.plot(&series, LineMode::Straight).expect("straight plot");

    let surface = chart.into_surface();
    assert_eq!(surface.stats().strokes, 15 + 8 + 16 + 9 + 2);
    assert_eq!(surface.width(), 960);
    assert_eq!(surface.height(), 540);
}

#[test]
fn cairo_surface_encodes_png() {
    let mut host = CairoHost::new(220);
    let config = ChartConfig::new(CellsCount::new(10, 10), HeightBounds::new(3.0, 1.0))
        .with_cells(true)
        .with_border(true);
    let mut chart = Chart::new(&mut host, config).expect("chart init");
    chart
        .plot(&[0.0, 2.0, 5.0, 3.0], LineMode::Straight)
        .expect("plot");

    let mut png = Vec::new();
    chart.surface().write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_chart_accepts_all_zero_dash() {
    let mut host = CairoHost::new(220);
    let mut config = ChartConfig::new(CellsCount::new(10, 10), HeightBounds::new(3.0, 1.0))
        .with_cells(true);
    config.styles.cells_line = config.styles.cells_line.with_dash(&[0.0, 0.0]);
    let mut chart = Chart::new(&mut host, config).expect("zero dash draws solid cells");
    chart
        .plot(&[1.0, 4.0, 2.0], LineMode::Straight)
        .expect("plot after zero dash");
    assert!(chart.surface().stats().strokes > 0);
}
