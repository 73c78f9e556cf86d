//! Ramp profile preview

use std::process::ExitCode;

use clap::Args;
use costcast_drivers::profile;
use costcast_types::RampShape;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliResult;
use crate::output::{print_single, print_table, OutputFormat};

#[derive(Args, Debug)]
pub struct RampArgs {
    /// Ramp shape (step, linear, exp)
    #[arg(long)]
    shape: String,

    /// Onset window in months
    #[arg(long)]
    duration: u32,

    /// Months to show (defaults to the window plus two)
    #[arg(long)]
    months: Option<u32>,
}

#[derive(Debug, Serialize, Tabled)]
struct RampRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Factor")]
    factor: f64,
}

pub fn execute(args: RampArgs, format: OutputFormat) -> CliResult<ExitCode> {
    let shape: RampShape = args.shape.parse()?;
    let months = args.months.unwrap_or(args.duration + 2).max(1);

    let rows: Vec<RampRow> = profile(shape, u64::from(args.duration), u64::from(months))
        .into_iter()
        .zip(0..)
        .map(|(factor, month)| RampRow { month, factor })
        .collect();

    match format {
        OutputFormat::Table => print_table(rows),
        _ => print_single(&rows, format)?,
    }
    Ok(ExitCode::SUCCESS)
}
