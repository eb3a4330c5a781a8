#[cfg(feature = "cairo-backend")]
use gridline_chart::render::Color;
#[cfg(feature = "cairo-backend")]
use gridline_chart::{ChartConfig, LineMode};
#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_WIDTH: u32 = 960;
#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "chart.png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    config_path: PathBuf,
    series_path: PathBuf,
    output_path: PathBuf,
    mode: LineMode,
    width: u32,
    background: Option<Color>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = gridline_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use gridline_chart::Chart;
    use gridline_chart::render::CairoHost;

    let args = parse_args()?;
    let raw_config = fs::read_to_string(&args.config_path).map_err(|err| {
        format!(
            "failed to read config `{}`: {err}",
            args.config_path.display()
        )
    })?;
    let config = ChartConfig::from_json_str(&raw_config).map_err(|err| err.to_string())?;

    let raw_series = fs::read_to_string(&args.series_path).map_err(|err| {
        format!(
            "failed to read series `{}`: {err}",
            args.series_path.display()
        )
    })?;
    let series: Vec<f64> = serde_json::from_str(&raw_series)
        .map_err(|err| format!("failed to parse series json: {err}"))?;

    let mut host = CairoHost::new(args.width);
    if let Some(color) = args.background {
        host = host.with_background(color);
    }
    let mut chart = Chart::new(&mut host, config).map_err(|err| err.to_string())?;
    chart
        .plot(&series, args.mode)
        .map_err(|err| format!("plot failed: {err}"))?;

    let geometry = *chart.geometry();
    chart
        .surface()
        .save_png(&args.output_path)
        .map_err(|err| err.to_string())?;

    println!(
        "wrote {} ({}x{}, step_y={}, {} samples, {})",
        args.output_path.display(),
        geometry.width,
        geometry.height,
        geometry.step_y,
        series.len(),
        args.mode
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut series_path: Option<PathBuf> = None;
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut mode = LineMode::Straight;
    let mut width = DEFAULT_WIDTH;
    let mut background: Option<Color> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(value_for("--config")?)),
            "--series" => series_path = Some(PathBuf::from(value_for("--series")?)),
            "--output" => output_path = PathBuf::from(value_for("--output")?),
            "--mode" => {
                mode = value_for("--mode")?
                    .parse()
                    .map_err(|err: gridline_chart::ChartError| err.to_string())?;
            }
            "--width" => {
                let value = value_for("--width")?;
                width = value
                    .parse()
                    .map_err(|_| format!("invalid --width value `{value}`"))?;
            }
            "--background" => {
                let value = value_for("--background")?;
                background = Some(value.parse().map_err(
                    |err: gridline_chart::ChartError| err.to_string(),
                )?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        config_path: config_path
            .ok_or_else(|| format!("--config is required\n\n{}", usage_message()))?,
        series_path: series_path
            .ok_or_else(|| format!("--series is required\n\n{}", usage_message()))?,
        output_path,
        mode,
        width,
        background,
    })
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_chart_png -- \\
  --config <chart.json> --series <series.json> [--mode straight|bezier] \\
  [--width <px>] [--background <color>] [--output <png>]\n\n\
Defaults:\n  --mode straight\n  --width {DEFAULT_WIDTH}\n  --output {DEFAULT_OUTPUT_PATH}"
    )
}
