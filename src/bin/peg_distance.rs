//! peg-distance — solve latent distances for every asset in a CSV panel.
//!
//! Reads a date-indexed CSV (one risk-free-rate column, one price column per
//! asset), runs the estimator, and writes a CSV of distances with empty cells
//! where no value is defined. Solver non-convergence and per-day failures go
//! to the log sink (stderr, or `--log-file`).
//!
//! Usage:
//!   peg-distance --input Official_Data.csv --output output/Official_d_data.csv \
//!       --log-file log.txt
use std::{fs, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use peg_distance::{
    distance::{
        core::{
            classifier::ClassifierLists,
            options::{DistanceOptions, StrategyOptions},
            pricing::PricingModel,
            reporter::TracingReporter,
        },
        models::estimator::DistanceEstimator,
    },
    io::{DEFAULT_RATE_COLUMN, read_panel_path, write_results_path},
    optimization::residual_solver::traits::Tolerances,
};

#[derive(Parser, Debug)]
#[command(name = "peg-distance")]
#[command(about = "Estimate daily distance-to-default for currency and stablecoin pegs")]
struct Args {
    /// Input panel CSV (date in the first column)
    #[arg(long, env = "PEG_DISTANCE_INPUT")]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, env = "PEG_DISTANCE_OUTPUT", default_value = "./output/Official_d_data.csv")]
    output: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "PEG_DISTANCE_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Name of the risk-free-rate column
    #[arg(long, env = "PEG_DISTANCE_RATE_COLUMN", default_value = DEFAULT_RATE_COLUMN)]
    rate_column: String,

    /// Trailing window (days) for the volatility estimate
    #[arg(long, default_value = "90")]
    window: usize,

    /// Market value V of debt and equity claims
    #[arg(long, default_value = "100")]
    market_value: f64,

    /// Face value D of debt redeemed
    #[arg(long, default_value = "1")]
    face_value: f64,

    /// Initial guess of the root finder
    #[arg(long, default_value = "2.0")]
    direct_guess: f64,

    /// Initial guess of the global search
    #[arg(long, default_value = "75")]
    global_guess: f64,

    /// Assets priced without the stablecoin fold (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "bit,eth,xrp,NGN,Lira")]
    non_stablecoins: Vec<String>,

    /// Assets solved by global search (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "bit,eth")]
    global_search: Vec<String>,

    /// Iteration cap of each solve
    #[arg(long, default_value = "200")]
    max_iter: usize,

    /// Restrict the run to these assets (comma-separated)
    #[arg(long, value_delimiter = ',')]
    assets: Option<Vec<String>>,

    /// Solve assets in parallel
    #[arg(long, env = "PEG_DISTANCE_PARALLEL")]
    parallel: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let opts = build_options(&args)?;
    let panel = read_panel_path(&args.input, &args.rate_column)
        .with_context(|| format!("reading panel from {}", args.input.display()))?;
    info!(
        dates = panel.len(),
        assets = panel.assets().len(),
        window = opts.rolling_window,
        parallel = opts.parallel,
        "panel loaded"
    );

    let estimator = DistanceEstimator::new(opts);
    let reporter = TracingReporter;
    let table = match &args.assets {
        Some(assets) => {
            let ids: Vec<&str> = assets.iter().map(String::as_str).collect();
            estimator.estimate_assets(&panel, &ids, &reporter)?
        }
        None => estimator.estimate(&panel, &reporter),
    };

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    write_results_path(&args.output, &table)
        .with_context(|| format!("writing results to {}", args.output.display()))?;

    let (converged, undefined) = table.columns.iter().fold((0, 0), |(c, u), column| {
        let s = column.summary();
        (c + s.converged, u + s.non_convergent + s.failed)
    });
    info!(
        output = %args.output.display(),
        converged,
        undefined,
        "results written"
    );
    Ok(())
}

/// Filter from `RUST_LOG` directives, or `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    match log_file {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn build_options(args: &Args) -> Result<DistanceOptions> {
    let pricing = PricingModel::new(args.market_value, args.face_value)?;
    let defaults = Tolerances::default();
    let tols =
        Tolerances::new(defaults.tol_residual, defaults.tol_step, defaults.tol_sd, args.max_iter)?;
    let direct = StrategyOptions::new("direct", args.direct_guess, tols.clone())?;
    let global = StrategyOptions::new("global search", args.global_guess, tols)?;
    let lists = ClassifierLists::new(args.non_stablecoins.clone(), args.global_search.clone());
    let opts = DistanceOptions::new(args.window, pricing, direct, global, lists, args.parallel)?;
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    // Purpose
    // -------
    // `RUST_LOG` directives set the verbosity; `info` is only the fallback.
    //
    // Given
    // -----
    // - Directives "warn", then no directives.
    //
    // Expect
    // ------
    // - "warn" caps the filter at WARN (info events are dropped).
    // - No directives gives INFO.
    fn env_directives_override_default_level() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }
}
