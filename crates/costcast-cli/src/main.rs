//! costcast - what-if cost and headcount scenarios from the terminal
//!
//! - `simulate`: validate a parameter mapping and apply it to a baseline
//! - `validate`: bounds-check a parameter mapping on its own
//! - `compile`: turn a classified intent into parameters
//! - `ramp`: preview an onset ramp profile

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{compile, ramp, simulate, validate};
use config::CliConfig;
use error::CliResult;

/// costcast CLI application
#[derive(Parser)]
#[command(name = "costcast")]
#[command(about = "costcast - cost and FTE scenario simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "COSTCAST_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Validate and apply scenario parameters to a baseline
    #[command(alias = "sim")]
    Simulate(simulate::SimulateArgs),

    /// Bounds-check scenario parameters
    Validate(validate::ValidateArgs),

    /// Compile a classified intent into scenario parameters
    Compile(compile::CompileArgs),

    /// Show an onset ramp profile
    Ramp(ramp::RampArgs),

    /// Show the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so json/yaml output stays parseable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate(args) => simulate::execute(args, &config, cli.output),
        Commands::Validate(args) => validate::execute(args, &config, cli.output),
        Commands::Compile(args) => compile::execute(args, &config, cli.output),
        Commands::Ramp(args) => ramp::execute(args, cli.output),
        Commands::Config => {
            match cli.output {
                output::OutputFormat::Yaml => output::print_single(&config, cli.output)?,
                output::OutputFormat::Json => output::print_single(&config, cli.output)?,
                output::OutputFormat::Table => print!("{}", toml::to_string_pretty(&config)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
