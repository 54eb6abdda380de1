//! Integration tests for the daily latent-distance pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end run: from a validated price/rate panel,
//!   through classification, rolling volatility and the per-day solvers, to
//!   the result table and its CSV rendering.
//! - Use smooth synthetic markets (a stablecoin oscillating just under its
//!   peg, a plain currency near 3.0, and a heavy-tailed coin far above the
//!   model's price range) rather than single-day toy inputs.
//!
//! Coverage
//! --------
//! - `distance::models::DistanceEstimator`:
//!   - Output shape and warm-up padding.
//!   - Re-substitution of converged distances into the pricing equation.
//!   - Determinism, asset-order independence, and serial vs parallel runs.
//!   - The reporting path for a degenerate (constant-price) series.
//!   - Missing rate and price cells: isolated failures that never abort the
//!     run, for every strategy.
//! - `distance::core::pricing::PricingModel`:
//!   - The documented worked example and the stablecoin fold.
//! - `io::reader` / `io::writer`:
//!   - Reading a panel from CSV text and writing the resulting table.
//!
//! Exclusions
//! ----------
//! - Argument parsing and logging setup of the `peg-distance` binary.
//! - Python bindings.
//! - Solver internals (step damping, simplex construction); those are
//!   covered by unit tests.
use approx::assert_relative_eq;
use chrono::{Days, NaiveDate};
use peg_distance::{
    distance::{
        AssetClass, AssetSeries, ClassifierLists, DistanceEstimator, DistanceOptions,
        NullReporter, Panel, PricingModel, RecordingReporter, ResultTable, Severity,
        SolverOutcome, StrategyKind, StrategyOptions,
        core::{pricing::DayInputs, volatility::VolatilityEstimator},
    },
    io::{read_panel, write_results},
    optimization::residual_solver::Tolerances,
};

const N_DAYS: usize = 40;
const WINDOW: usize = 10;

/// Purpose
/// -------
/// Build the synthetic market shared by most tests.
///
/// Columns
/// -------
/// - `usdt`: stablecoin oscillating in `0.995 ± 0.003`.
/// - `xrp`: plain asset oscillating in `3.0 ± 0.2`.
/// - `bit`: heavy-tailed asset around 42 000.
/// - Rate: `0.05 + 0.001·cos(0.3·t)`, used as given.
fn synthetic_panel() -> Panel {
    let dates = (0..N_DAYS).map(day_date).collect();
    let rate: Vec<f64> = (0..N_DAYS).map(|t| 0.05 + 0.001 * (0.3 * t as f64).cos()).collect();
    let usdt: Vec<f64> = (0..N_DAYS).map(|t| 0.995 + 0.003 * (0.7 * t as f64).sin()).collect();
    let xrp: Vec<f64> = (0..N_DAYS).map(|t| 3.0 + 0.2 * (0.45 * t as f64).sin()).collect();
    let bit: Vec<f64> = (0..N_DAYS).map(|t| 42_000.0 + 500.0 * (0.2 * t as f64).sin()).collect();
    let assets = vec![
        AssetSeries::new("usdt", usdt),
        AssetSeries::new("xrp", xrp),
        AssetSeries::new("bit", bit),
    ];
    Panel::new(dates, rate, assets).expect("synthetic panel should validate")
}

fn day_date(t: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.checked_add_days(Days::new(t as u64)))
        .expect("valid calendar date")
}

/// Purpose
/// -------
/// Reference options with a short rolling window so the synthetic panel
/// has thirty solvable days per asset.
fn short_window_options() -> DistanceOptions {
    let defaults = DistanceOptions::default();
    DistanceOptions::new(
        WINDOW,
        defaults.pricing,
        defaults.direct,
        defaults.global,
        ClassifierLists::default(),
        false,
    )
    .expect("valid options")
}

fn estimate(options: DistanceOptions, panel: &Panel) -> ResultTable {
    DistanceEstimator::new(options).estimate(panel, &NullReporter)
}

#[test]
// Purpose
// -------
// The result table mirrors the panel: one column per asset, one entry per
// date, warm-up padding on the first W days and solved entries afterwards.
//
// Given
// -----
// - The synthetic panel and W = 10.
//
// Expect
// ------
// - Columns in panel order, each of length N.
// - Entries 0..W are `WarmUp`; entries W..N are never `WarmUp`.
// - Classes follow the default lists.
fn result_table_matches_panel_shape() {
    let panel = synthetic_panel();

    let table = estimate(short_window_options(), &panel);

    assert_eq!(table.dates, panel.dates());
    assert_eq!(table.asset_ids().collect::<Vec<_>>(), vec!["usdt", "xrp", "bit"]);
    for column in &table.columns {
        assert_eq!(column.outcomes.len(), N_DAYS);
        assert!(column.outcomes[..WINDOW].iter().all(|o| *o == SolverOutcome::WarmUp));
        assert!(column.outcomes[WINDOW..].iter().all(|o| *o != SolverOutcome::WarmUp));
        assert!(column.values().iter().take(WINDOW).all(|v| v.is_nan()));
        let summary = column.summary();
        assert_eq!(summary.warm_up, WINDOW);
        assert_eq!(summary.total(), N_DAYS);
    }
    assert_eq!(table.column("usdt").map(|c| c.class), Some(AssetClass::Stablecoin));
    assert_eq!(table.column("xrp").map(|c| c.class), Some(AssetClass::Plain));
    assert_eq!(table.column("bit").map(|c| c.class), Some(AssetClass::HeavyTailed));
}

#[test]
// Purpose
// -------
// Every converged root-finder distance reproduces the observed price when
// substituted back into the pricing equation with that day's σ and r.
//
// Given
// -----
// - The synthetic panel; σ recomputed independently with
//   `VolatilityEstimator`.
//
// Expect
// ------
// - `|P̂(h) − P| ≤ 1e-9` for every converged day of `usdt` and `xrp`.
// - Both `xrp` and `usdt` converge on all 30 solvable days, including the
//   stablecoin days priced near the fold.
fn converged_distances_reproduce_observed_prices() {
    let panel = synthetic_panel();
    let options = short_window_options();
    let model = options.pricing;
    let volatility = VolatilityEstimator::new(WINDOW);

    let table = estimate(options, &panel);

    for asset in ["usdt", "xrp"] {
        let column = table.column(asset).expect("column present");
        let prices = panel.asset(asset).expect("asset present").prices.view();
        let mut converged = 0;
        for (day, outcome) in column.outcomes.iter().enumerate() {
            if let SolverOutcome::Converged(h) = outcome {
                let sigma = volatility.sigma_at(prices, day).expect("valid volatility");
                let implied = model.implied_price(*h, sigma, panel.rate()[day], column.class);
                assert_relative_eq!(implied, prices[day], epsilon = 1e-9);
                converged += 1;
            }
        }
        assert_eq!(converged, N_DAYS - WINDOW, "{asset}: converged days");
    }
}

#[test]
// Purpose
// -------
// The worked example (V = 100, D = 1, r = 0, σ = 0.05, P = 1, plain asset)
// is solved by the root finder.
//
// Expect
// ------
// - Convergence with a residual at most 1e-10, and a distance beyond 5.
fn worked_example_is_solved_directly() {
    let options = DistanceOptions::default();
    let day = DayInputs { observed_price: 1.0, sigma: 0.05, rate: 0.0, class: AssetClass::Plain };

    let report = StrategyKind::Direct
        .solve(&options.pricing, &day, &options.direct)
        .expect("worked example should not fail");

    assert!(report.converged, "status: {}", report.status);
    assert!(report.residual.abs() <= 1e-10);
    assert!(report.h_hat > 5.0);
    let implied = options.pricing.implied_price(report.h_hat, 0.05, 0.0, AssetClass::Plain);
    assert_relative_eq!(implied, 1.0, epsilon = 1e-6);
}

#[test]
// Purpose
// -------
// The stablecoin fold keeps implied prices at or below par and inverts
// the unfolded price whenever it exceeds one.
//
// Given
// -----
// - A grid of h in [−3, 8] with σ = 0.2 and r = 0.01.
//
// Expect
// ------
// - Stablecoin price ≤ 1 everywhere.
// - Stablecoin price = min(PEx, 1 / PEx) and plain price = PEx.
fn stablecoin_fold_caps_price_at_par() {
    let model = PricingModel::default();

    for step in 0..=110 {
        let h = -3.0 + 0.1 * step as f64;
        let parity = model.implied_parity(h, 0.2, 0.01);
        let coin = model.implied_price(h, 0.2, 0.01, AssetClass::Stablecoin);
        let plain = model.implied_price(h, 0.2, 0.01, AssetClass::Plain);

        assert!(coin <= 1.0, "h = {h}: folded price {coin} above par");
        assert_eq!(coin, if parity > 1.0 { 1.0 / parity } else { parity });
        assert_eq!(plain, parity);
    }
}

#[test]
// Purpose
// -------
// Runs are deterministic and do not depend on asset order or on parallel
// execution.
//
// Given
// -----
// - The synthetic panel, the same panel with assets reversed, and the
//   parallel flag toggled.
//
// Expect
// ------
// - Two serial runs produce identical tables.
// - Per-asset columns match between asset orders.
// - Serial and parallel tables are identical.
fn runs_are_deterministic_and_order_independent() {
    let panel = synthetic_panel();
    let reversed = Panel::new(
        panel.dates().to_vec(),
        panel.rate().to_vec(),
        panel.assets().iter().rev().cloned().collect(),
    )
    .expect("reversed panel should validate");

    let first = estimate(short_window_options(), &panel);
    let second = estimate(short_window_options(), &panel);
    let flipped = estimate(short_window_options(), &reversed);
    let parallel = estimate(short_window_options().with_parallel(true), &panel);

    assert_eq!(first, second);
    assert_eq!(first, parallel);
    assert_eq!(flipped.asset_ids().collect::<Vec<_>>(), vec!["bit", "xrp", "usdt"]);
    for column in &first.columns {
        assert_eq!(flipped.column(&column.asset), Some(column));
    }
}

#[test]
// Purpose
// -------
// A constant-price series has zero volatility; every solvable day becomes
// an error-severity report and an undefined entry, while other assets are
// unaffected.
//
// Given
// -----
// - A stablecoin pinned at 1.0 next to the oscillating `usdt` column.
//
// Expect
// ------
// - `pinned` has 30 `Failed` outcomes and 30 error reports on days W..N.
// - `usdt` produces no error reports.
fn constant_prices_are_reported_as_failures() {
    let base = synthetic_panel();
    let mut assets = base.assets().to_vec();
    assets.push(AssetSeries::new("pinned", vec![1.0; N_DAYS]));
    let panel = Panel::new(base.dates().to_vec(), base.rate().to_vec(), assets)
        .expect("panel should validate");
    let recorder = RecordingReporter::new();

    let table = DistanceEstimator::new(short_window_options()).estimate(&panel, &recorder);

    let pinned = table.column("pinned").expect("column present");
    assert_eq!(pinned.summary().failed, N_DAYS - WINDOW);
    assert!(pinned.outcomes[WINDOW..].iter().all(|o| matches!(o, SolverOutcome::Failed(_))));
    let reports = recorder.entries_for("pinned");
    assert_eq!(reports.len(), N_DAYS - WINDOW);
    assert!(reports.iter().all(|e| e.severity == Severity::Error));
    assert_eq!(
        reports.iter().map(|e| e.day).collect::<Vec<_>>(),
        (WINDOW..N_DAYS).collect::<Vec<_>>()
    );
    assert!(recorder.entries_for("usdt").iter().all(|e| e.severity != Severity::Error));
}

#[test]
// Purpose
// -------
// A missing rate cell fails only that day, for every asset and strategy,
// including the heavy-tailed global search. The run finishes and the other
// days are unaffected.
//
// Given
// -----
// - The synthetic panel with `rate[20] = NaN`, estimated in parallel.
//
// Expect
// ------
// - Day 20 is `Failed` in every column, with one error report naming the
//   rate input.
// - No other solvable day is `Failed`.
fn missing_rate_fails_only_that_day() {
    const MISSING: usize = 20;
    let base = synthetic_panel();
    let mut rate = base.rate().to_vec();
    rate[MISSING] = f64::NAN;
    let panel = Panel::new(base.dates().to_vec(), rate, base.assets().to_vec())
        .expect("panel should validate");
    let recorder = RecordingReporter::new();

    let table = DistanceEstimator::new(short_window_options().with_parallel(true))
        .estimate(&panel, &recorder);

    for asset in ["usdt", "xrp", "bit"] {
        let column = table.column(asset).expect("column present");
        assert!(
            matches!(column.outcomes[MISSING], SolverOutcome::Failed(_)),
            "{asset}: day {MISSING} is {:?}",
            column.outcomes[MISSING]
        );
        assert_eq!(column.summary().failed, 1, "{asset}: failed days");
        let errors: Vec<_> = recorder
            .entries_for(asset)
            .into_iter()
            .filter(|e| e.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1, "{asset}: error reports");
        assert_eq!(errors[0].day, MISSING);
        assert!(errors[0].message.contains("`rate`"), "{}", errors[0].message);
    }
}

#[test]
// Purpose
// -------
// A missing price cell fails its own day but not the volatility windows
// that contain it; the gap is carried forward inside those windows.
//
// Given
// -----
// - The synthetic panel with `xrp` price at day 15 set to NaN (W = 10).
//
// Expect
// ------
// - Day 15 of `xrp` is `Failed` with one error report.
// - Days 16..=25, whose windows include day 15, and every later day
//   converge.
fn missing_price_fails_only_its_own_day() {
    const MISSING: usize = 15;
    let base = synthetic_panel();
    let assets = base
        .assets()
        .iter()
        .map(|series| {
            let mut prices = series.prices.to_vec();
            if series.id == "xrp" {
                prices[MISSING] = f64::NAN;
            }
            AssetSeries::new(series.id.clone(), prices)
        })
        .collect();
    let panel = Panel::new(base.dates().to_vec(), base.rate().to_vec(), assets)
        .expect("panel should validate");
    let recorder = RecordingReporter::new();

    let table = DistanceEstimator::new(short_window_options())
        .estimate_assets(&panel, &["xrp"], &recorder)
        .expect("xrp is in the panel");

    let column = table.column("xrp").expect("column present");
    assert!(matches!(column.outcomes[MISSING], SolverOutcome::Failed(_)));
    for day in (WINDOW..N_DAYS).filter(|&d| d != MISSING) {
        assert!(
            matches!(column.outcomes[day], SolverOutcome::Converged(_)),
            "day {day} is {:?}",
            column.outcomes[day]
        );
    }
    let errors: Vec<_> =
        recorder.entries().into_iter().filter(|e| e.severity == Severity::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].day, MISSING);
}

#[test]
// Purpose
// -------
// A tight iteration cap turns days into non-convergent outcomes with
// info-level reports instead of failures.
//
// Given
// -----
// - Direct tolerances with `max_iter = 1` on the `xrp` column.
//
// Expect
// ------
// - Every non-converged day is `NonConvergent` with an info report.
fn iteration_cap_is_reported_as_non_convergence() {
    let defaults = DistanceOptions::default();
    let tols = Tolerances::new(1e-10, 1.49012e-8, 1e-8, 1).expect("valid tolerances");
    let direct = StrategyOptions::new("direct", 2.0, tols).expect("valid guess");
    let options = DistanceOptions::new(
        WINDOW,
        defaults.pricing,
        direct,
        defaults.global,
        ClassifierLists::default(),
        false,
    )
    .expect("valid options");
    let panel = synthetic_panel();
    let recorder = RecordingReporter::new();

    let table = DistanceEstimator::new(options)
        .estimate_assets(&panel, &["xrp"], &recorder)
        .expect("xrp is in the panel");

    let column = table.column("xrp").expect("column present");
    let summary = column.summary();
    assert_eq!(summary.failed, 0);
    assert!(summary.non_convergent > 0);
    assert_eq!(recorder.count(Severity::Info), summary.non_convergent);
    assert_eq!(recorder.count(Severity::Error), 0);
}

#[test]
// Purpose
// -------
// Reading a CSV panel, estimating, and writing the table preserves dates,
// column order and values.
//
// Given
// -----
// - The synthetic panel rendered as CSV text with a `DGS3MO` rate column
//   placed between asset columns.
//
// Expect
// ------
// - The parsed panel equals the in-memory panel.
// - The written table has a `date,usdt,xrp,bit` header, N data rows,
//   empty cells during warm-up, and values equal to the table's.
fn csv_round_trip_preserves_results() {
    let panel = synthetic_panel();
    let mut text = String::from("Date,usdt,DGS3MO,xrp,bit\n");
    for day in 0..N_DAYS {
        let cell = |id: &str| panel.asset(id).map(|a| a.prices[day]).unwrap_or(f64::NAN);
        text.push_str(&format!(
            "{},{},{},{},{}\n",
            panel.dates()[day].format("%Y-%m-%d"),
            cell("usdt"),
            panel.rate()[day],
            cell("xrp"),
            cell("bit"),
        ));
    }

    let parsed = read_panel(text.as_bytes(), "DGS3MO").expect("csv should parse");
    assert_eq!(parsed, panel);

    let table = estimate(short_window_options(), &parsed);
    let mut sink = Vec::new();
    write_results(&mut sink, &table).expect("write should succeed");
    let written = String::from_utf8(sink).expect("utf-8 output");
    let lines: Vec<&str> = written.lines().collect();

    assert_eq!(lines[0], "date,usdt,xrp,bit");
    assert_eq!(lines.len(), N_DAYS + 1);
    assert_eq!(lines[1], "2024-01-01,,,");
    for (day, line) in lines.iter().skip(1).enumerate() {
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells[0], table.dates[day].format("%Y-%m-%d").to_string());
        for (column, cell) in table.columns.iter().zip(&cells[1..]) {
            match column.outcomes[day].value() {
                Some(h) => assert_eq!(cell.parse::<f64>().ok(), Some(h)),
                None => assert!(cell.is_empty()),
            }
        }
    }
}
