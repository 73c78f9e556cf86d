//! Validate and apply a scenario to a baseline

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use costcast_drivers::{calibrate, DriverError};
use costcast_guard::{BoundsValidator, SimulationFrame};
use costcast_overlay::{OverlayEngine, OverlayOptions, ScenarioSummary};
use costcast_types::{
    DriverContext, MonthlySeries, ScenarioParams, Severity, ValidationResult,
};
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use super::{read_input, report_validation, EXIT_REJECTED};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{amount, percent, print_info, print_single, print_table, OutputFormat};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Baseline series file (JSON or YAML)
    #[arg(long)]
    baseline: PathBuf,

    /// Scenario parameter mapping (JSON or YAML)
    #[arg(long)]
    params: PathBuf,

    /// Fixed monthly cost; requires --beta
    #[arg(long, requires = "beta")]
    alpha: Option<f64>,

    /// Cost per FTE; requires --alpha
    #[arg(long, requires = "alpha")]
    beta: Option<f64>,

    /// Fixed share of the first month's cost, for calibration
    #[arg(long, conflicts_with_all = ["alpha", "beta"])]
    fixed_share: Option<f64>,

    /// Headcount in the first month, for calibration
    #[arg(long, conflicts_with_all = ["alpha", "beta"])]
    fte: Option<f64>,

    /// Truncate the projection to this many months
    #[arg(long)]
    horizon: Option<usize>,

    /// Label for the scenario series
    #[arg(long)]
    label: Option<String>,

    /// Severity tier for the validator (operational, stress, crisis)
    #[arg(long, default_value = "operational")]
    severity: Severity,

    /// Apply the parameters without bounds validation
    #[arg(long)]
    skip_validation: bool,
}

#[derive(Debug, Serialize)]
struct SimulateReport {
    params: ScenarioParams,
    validation: ValidationResult,
    summary: Option<ScenarioSummary>,
    series: MonthlySeries,
}

#[derive(Debug, Tabled)]
struct SeriesRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Delta")]
    delta: String,
}

pub fn execute(args: SimulateArgs, config: &CliConfig, format: OutputFormat) -> CliResult<ExitCode> {
    let baseline: MonthlySeries = read_input(&args.baseline)?;
    let first = baseline
        .first()
        .map(|p| p.value)
        .ok_or_else(|| CliError::InvalidInput("baseline series is empty".into()))?;

    let context = match (args.alpha, args.beta) {
        (Some(alpha), Some(beta)) => DriverContext::new(alpha, beta).map_err(DriverError::from)?,
        _ => calibrate(
            first,
            args.fte.unwrap_or(config.model.reference_fte),
            args.fixed_share.unwrap_or(config.model.fixed_share),
        )?,
    };
    debug!(alpha = context.alpha(), beta = context.beta(), "driver context");

    let raw: serde_json::Value = read_input(&args.params)?;
    let (params, validation) = if args.skip_validation {
        (ScenarioParams::from_value(&raw)?, ValidationResult::default())
    } else {
        let mut frame = SimulationFrame::new(context, first)?.with_severity(args.severity);
        if let Some(start) = baseline.start() {
            frame = frame.with_start(start);
        }
        let outcome = BoundsValidator::new(config.guard.clone()).validate_value(&raw, &frame);
        let result = outcome.result();
        match outcome.into_params() {
            Some(params) => (params, result),
            None => {
                report_validation(&result);
                return Ok(ExitCode::from(EXIT_REJECTED));
            }
        }
    };

    let mut options = OverlayOptions::default()
        .with_beta_inflation(config.model.beta_inflation_per_year)
        .with_cost_target_basis(config.model.cost_target_basis);
    if let Some(horizon) = args.horizon {
        options = options.with_horizon(horizon);
    }
    if let Some(label) = args.label {
        options = options.with_label(label);
    }

    let projection = OverlayEngine::new(options).project(&baseline, &params, &context)?;
    let summary = projection.summary(&baseline);

    match format {
        OutputFormat::Table => {
            let rows = baseline
                .points()
                .iter()
                .zip(projection.series.points())
                .map(|(b, s)| SeriesRow {
                    month: s.date.format("%Y-%m").to_string(),
                    baseline: amount(b.value),
                    scenario: amount(s.value),
                    delta: amount(s.value - b.value),
                })
                .collect();
            print_table(rows);
            if let Some(summary) = &summary {
                print_summary(summary);
            }
            report_validation(&validation);
        }
        _ => {
            let report = SimulateReport {
                params,
                validation,
                summary,
                series: projection.series,
            };
            print_single(&report, format)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &ScenarioSummary) {
    print_info(&format!(
        "{} months: baseline {} → scenario {} ({}{})",
        summary.months,
        amount(summary.baseline_total),
        amount(summary.scenario_total),
        amount(summary.delta),
        summary
            .delta_pct
            .map(|p| format!(", {}", percent(p)))
            .unwrap_or_default()
    ));
    if let Some(multiplier) = summary.final_multiplier {
        print_info(&format!("Final month at {multiplier:.3}× the starting level"));
    }
    print_info(&format!(
        "Lowest month {} at {}",
        summary.min_date.format("%Y-%m"),
        amount(summary.min_value)
    ));
}
