//! Compile a classified intent into scenario parameters

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use costcast_intent::{CompileContext, IntentCompiler};
use costcast_types::{parse_month, MonthlySeries, ScenarioIntent};
use tabled::Tabled;

use super::read_input;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_single, print_table, print_warning, OutputFormat};

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Intent file (JSON or YAML)
    #[arg(long)]
    intent: PathBuf,

    /// Baseline file; supplies start, horizon and level
    #[arg(long, conflicts_with = "start")]
    baseline: Option<PathBuf>,

    /// First month of the baseline (YYYY-MM)
    #[arg(long, required_unless_present = "baseline")]
    start: Option<String>,

    /// Months the baseline covers
    #[arg(long)]
    horizon: Option<usize>,

    /// Typical monthly cost, for currency magnitudes
    #[arg(long)]
    level: Option<f64>,
}

#[derive(Debug, Tabled)]
struct AssumptionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Assumption")]
    text: String,
}

pub fn execute(args: CompileArgs, config: &CliConfig, format: OutputFormat) -> CliResult<ExitCode> {
    let intent: ScenarioIntent = read_input(&args.intent)?;
    let ctx = context(&args, config)?;

    let result = IntentCompiler::new(config.compiler.clone()).compile(&intent, &ctx);

    match format {
        OutputFormat::Table => {
            print_info(&result.summary);
            let rows = result
                .assumptions
                .iter()
                .enumerate()
                .map(|(i, text)| AssumptionRow {
                    index: i + 1,
                    text: text.clone(),
                })
                .collect();
            print_table(rows);
            println!("{}", serde_json::to_string_pretty(&result.params)?);
            if let Some(question) = &result.clarifying_question {
                print_warning(question);
            }
        }
        _ => print_single(&result, format)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn context(args: &CompileArgs, config: &CliConfig) -> CliResult<CompileContext> {
    let horizon_default = config.guard.horizon_months;

    let mut ctx = match (&args.baseline, &args.start) {
        (Some(path), _) => {
            let baseline: MonthlySeries = read_input(path)?;
            let start = baseline
                .start()
                .ok_or_else(|| CliError::InvalidInput("baseline series is empty".into()))?;
            let mut ctx = CompileContext::new(start, args.horizon.unwrap_or(baseline.len()));
            if let Some(first) = baseline.first() {
                ctx = ctx.with_baseline_level(first.value);
            }
            ctx
        }
        (None, Some(start)) => {
            let start = parse_month(start).ok_or_else(|| {
                CliError::InvalidInput(format!("start must be YYYY-MM, got {start:?}"))
            })?;
            CompileContext::new(start, args.horizon.unwrap_or(horizon_default))
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "either --baseline or --start is required".into(),
            ))
        }
    };

    if let Some(level) = args.level {
        ctx = ctx.with_baseline_level(level);
    }
    Ok(ctx)
}
