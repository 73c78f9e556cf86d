//! Bounds-check a parameter mapping

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use costcast_guard::{BoundsValidator, SimulationFrame};
use costcast_types::{ScenarioParams, Severity, ValidationOutcome, ValidationResult};
use serde::Serialize;
use tabled::Tabled;

use super::{read_input, EXIT_REJECTED};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{print_error, print_single, print_success, print_table, print_warning, OutputFormat};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Scenario parameter mapping (JSON or YAML)
    #[arg(long)]
    params: PathBuf,

    /// Severity tier (operational, stress, crisis)
    #[arg(long, default_value = "operational")]
    severity: Severity,

    /// Starting monthly cost of the synthetic baseline
    #[arg(long)]
    level: Option<f64>,

    /// Starting headcount of the synthetic baseline
    #[arg(long)]
    fte: Option<f64>,

    /// Fixed share of the starting cost
    #[arg(long)]
    fixed_share: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ValidateReport {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<ScenarioParams>,
    result: ValidationResult,
}

#[derive(Debug, Tabled)]
struct IssueRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Message")]
    message: String,
}

pub fn execute(args: ValidateArgs, config: &CliConfig, format: OutputFormat) -> CliResult<ExitCode> {
    let raw: serde_json::Value = read_input(&args.params)?;
    let frame = SimulationFrame::calibrated(
        args.level.unwrap_or(config.model.reference_cost),
        args.fte.unwrap_or(config.model.reference_fte),
        args.fixed_share.unwrap_or(config.model.fixed_share),
    )?
    .with_severity(args.severity);

    let outcome = BoundsValidator::new(config.guard.clone()).validate_value(&raw, &frame);
    let status = match &outcome {
        ValidationOutcome::Accepted(_) => "accepted",
        ValidationOutcome::ClampedWithWarnings { .. } => "clamped",
        ValidationOutcome::Rejected { .. } => "rejected",
    };
    let rejected = !outcome.is_ok();
    let result = outcome.result();
    let params = outcome.into_params();

    match format {
        OutputFormat::Table => {
            let rows: Vec<IssueRow> = [
                ("error", &result.errors),
                ("warning", &result.warnings),
                ("clamp", &result.clamps),
            ]
            .into_iter()
            .flat_map(|(kind, issues)| {
                issues.iter().map(move |i| IssueRow {
                    kind,
                    code: i.code.clone(),
                    field: i.field.clone().unwrap_or_default(),
                    message: i.message.clone(),
                })
            })
            .collect();
            if !rows.is_empty() {
                print_table(rows);
            }
            match &params {
                Some(_) if result.is_clean() => print_success("Parameters accepted"),
                Some(_) => print_warning("Parameters adjusted"),
                None => print_error("Parameters rejected"),
            }
            if let Some(p) = &params {
                println!("{}", serde_json::to_string_pretty(p)?);
            }
        }
        _ => {
            let report = ValidateReport {
                status,
                params,
                result,
            };
            print_single(&report, format)?;
        }
    }

    Ok(if rejected {
        ExitCode::from(EXIT_REJECTED)
    } else {
        ExitCode::SUCCESS
    })
}
