use std::fs;
use std::path::{Path, PathBuf};

use sp500_charts::api::{ChartSection, Dashboard, DashboardConfig};
use sp500_charts::data::{DataSource, ResourceLocator};
use sp500_charts::render::{RenderFrame, Renderer, SvgRenderer};
use sp500_charts::telemetry;

const USAGE: &str = "usage: render_dashboard [--data-root <dir|url>] [--config <json>] \
     [--out <dir>] [--investment <amount>] [--png]";

#[derive(Debug)]
struct CliArgs {
    data_root: Option<String>,
    config_path: Option<PathBuf>,
    out_dir: PathBuf,
    investment: Option<f64>,
    png: bool,
}

#[tokio::main]
async fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => DashboardConfig::from_path(path).map_err(|err| err.to_string())?,
        None => DashboardConfig::default(),
    }
    .with_env_overrides()
    .with_base_path_override(args.data_root.clone());

    let source = DataSource::located(ResourceLocator::new(config.base_path.clone()));
    let mut dashboard = Dashboard::load(&source, &config).await;

    if let Some(amount) = args.investment {
        if let Some(chart) = dashboard.investment.ready_mut() {
            let accepted = chart
                .set_initial_investment(amount)
                .map_err(|err| err.to_string())?;
            if !accepted {
                eprintln!("ignoring invalid investment amount {amount}");
            }
        }
    }

    fs::create_dir_all(&args.out_dir).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.out_dir.display()
        )
    })?;

    let mut written = 0usize;
    let historical = section_frames("historical", &dashboard.historical, |chart| {
        Ok(vec![("historical", chart.build_frame()?)])
    });
    let treemap = section_frames("treemap", &dashboard.treemap, |chart| {
        Ok(vec![
            ("companies", chart.build_frame()?),
            ("companies_legend", chart.build_legend_frame()?),
        ])
    });
    let investment = section_frames("investment", &dashboard.investment, |chart| {
        Ok(vec![("investment", chart.build_frame()?)])
    });

    for (name, frame) in historical.into_iter().chain(treemap).chain(investment) {
        write_svg(&args.out_dir, name, &frame)?;
        if args.png {
            write_png(&args.out_dir, name, &frame)?;
        }
        written += 1;
    }

    println!(
        "wrote {written} chart(s) to {}",
        args.out_dir.display()
    );
    Ok(())
}

/// Frames of a ready section; failures are reported and skipped.
fn section_frames<T>(
    name: &str,
    section: &ChartSection<T>,
    build: impl FnOnce(&T) -> sp500_charts::ChartResult<Vec<(&'static str, RenderFrame)>>,
) -> Vec<(&'static str, RenderFrame)> {
    match section {
        ChartSection::Ready(chart) => build(chart).unwrap_or_else(|err| {
            eprintln!("{name}: failed to build frame: {err}");
            Vec::new()
        }),
        ChartSection::Failed(err) => {
            eprintln!("{name}: {err}");
            Vec::new()
        }
        ChartSection::Empty => {
            eprintln!("{name}: no data");
            Vec::new()
        }
    }
}

fn write_svg(out_dir: &Path, name: &str, frame: &RenderFrame) -> Result<(), String> {
    let mut renderer = SvgRenderer::new();
    renderer.render(frame).map_err(|err| err.to_string())?;
    let path = out_dir.join(format!("{name}.svg"));
    fs::write(&path, renderer.document())
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

#[cfg(feature = "cairo-backend")]
fn write_png(out_dir: &Path, name: &str, frame: &RenderFrame) -> Result<(), String> {
    use sp500_charts::render::CairoRenderer;

    let width = i32::try_from(frame.viewport.width).map_err(|err| err.to_string())?;
    let height = i32::try_from(frame.viewport.height).map_err(|err| err.to_string())?;
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    renderer.render(frame).map_err(|err| err.to_string())?;

    let path = out_dir.join(format!("{name}.png"));
    let mut file = fs::File::create(&path)
        .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
    renderer.write_png(&mut file).map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_out_dir: &Path, _name: &str, _frame: &RenderFrame) -> Result<(), String> {
    Err("--png requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut data_root = None::<String>;
    let mut config_path = None::<PathBuf>;
    let mut out_dir = PathBuf::from("charts");
    let mut investment = None::<f64>;
    let mut png = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--data-root" | "--base-path" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for {flag}"))?;
                data_root = Some(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                out_dir = PathBuf::from(value);
            }
            "--investment" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --investment".to_owned())?;
                let amount = value
                    .parse::<f64>()
                    .map_err(|err| format!("invalid --investment `{value}`: {err}"))?;
                investment = Some(amount);
            }
            "--png" => png = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        data_root,
        config_path,
        out_dir,
        investment,
        png,
    })
}
