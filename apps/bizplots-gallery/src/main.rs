//! bizplots gallery
//!
//! Simulates monthly revenue paths and writes one SVG per plot kind.
//!
//! Environment:
//! - `BIZPLOTS_CONFIG`: optional TOML file with a `PlotConfig`
//! - `BIZPLOTS_OUT`: output directory (default `gallery`)
//! - `RUST_LOG`: log filter (default `info`)

use std::path::{Path, PathBuf};

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use bizplots_core::{
    plot_quantiles, plot_ribbons, plot_spaghetti, CurrencyFormatter, PlotConfig, SvgFigure,
};
use bizplots_stats::BoxSamples;

const PATHS: usize = 500;
const MONTHS: usize = 36;
const DATA_SEED: u64 = 17;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    config.validate()?;

    let out_dir =
        PathBuf::from(std::env::var("BIZPLOTS_OUT").unwrap_or_else(|_| "gallery".to_string()));
    std::fs::create_dir_all(&out_dir)?;

    let paths = simulate_revenue(PATHS, MONTHS, DATA_SEED);
    let months: Vec<f64> = (1..=MONTHS).map(|m| m as f64).collect();

    write_quantiles(&config, &paths, &out_dir)?;
    write_spaghetti(&config, &months, &paths, &out_dir)?;
    write_ribbons(&config, &months, &paths, &out_dir)?;

    tracing::info!(out = %out_dir.display(), "gallery written");
    Ok(())
}

fn load_config() -> Result<PlotConfig, Box<dyn std::error::Error>> {
    match std::env::var("BIZPLOTS_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading config");
            let text = std::fs::read_to_string(&path)?;
            Ok(PlotConfig::from_toml(&text)?)
        }
        Err(_) => Ok(PlotConfig::default()),
    }
}

/// Monthly revenue paths with multiplicative noise, one row per path
fn simulate_revenue(paths: usize, months: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut revenue = Array2::zeros((paths, months));
    for mut row in revenue.rows_mut() {
        let mut level = 100_000.0;
        let drift = rng.gen_range(-0.01..0.03);
        for value in row.iter_mut() {
            level *= 1.0 + drift + rng.gen_range(-0.08..0.08);
            *value = level;
        }
    }
    revenue
}

fn figure(config: &PlotConfig, title: &str) -> SvgFigure {
    let formatter = CurrencyFormatter {
        format: config.currency.clone(),
        ..CurrencyFormatter::default()
    };
    SvgFigure::new(config.figure.clone())
        .with_title(title)
        .with_y_formatter(formatter)
}

fn write_quantiles(
    config: &PlotConfig,
    paths: &Array2<f64>,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    // Quarter-end months
    let quarter_ends: Vec<usize> = (2..paths.ncols()).step_by(3).collect();
    let columns = paths.select(Axis(1), &quarter_ends);
    let positions: Vec<f64> = (1..=quarter_ends.len()).map(|q| q as f64).collect();

    let mut fig = figure(config, "Revenue by quarter");
    plot_quantiles(
        &mut fig,
        &positions,
        BoxSamples::Columns(columns.view()),
        &config.quantiles,
        None,
        "quarter-end revenue",
    )?;
    fig.save(out_dir.join("quantiles.svg"))?;
    Ok(())
}

fn write_spaghetti(
    config: &PlotConfig,
    months: &[f64],
    paths: &Array2<f64>,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut fig = figure(config, "Sample revenue paths");
    let group = plot_spaghetti(
        &mut fig,
        months,
        paths.view(),
        &config.spaghetti.samples,
        &config.spaghetti,
        None,
        "simulated paths",
    )?;
    tracing::info!(lines = group.lines.len(), "spaghetti drawn");
    fig.save(out_dir.join("spaghetti.svg"))?;
    Ok(())
}

fn write_ribbons(
    config: &PlotConfig,
    months: &[f64],
    paths: &Array2<f64>,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut fig = figure(config, "Revenue percentile ribbons");
    plot_ribbons(
        &mut fig,
        months,
        paths.view(),
        &config.ribbons,
        None,
        "revenue range",
    )?;
    fig.save(out_dir.join("ribbons.svg"))?;
    Ok(())
}
