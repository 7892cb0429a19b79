use clap::Parser;
use epm_solver::io::Market;
use std::path::PathBuf;

mod config;
pub use config::AppConfig;

mod io;
pub use io::*;

mod log;
pub use log::*;

mod commands;
pub use commands::*;

// The top-level arguments: an optional config file and which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub async fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Clear { io } => {
                let input = io.read()?;
                let market = serde_json::from_reader::<_, Market>(input)?;
                let outcomes = clear::clear_parallel(market).await?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &outcomes)?;
            }
            Commands::Analyze {
                io,
                at_price,
                at_quantity,
            } => {
                let requests = analyze::requests(&at_price, &at_quantity)?;
                let input = io.read()?;
                let market = serde_json::from_reader::<_, Market>(input)?;
                let log = analyze::analyze(&market, &requests);
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &log)?;
            }
            Commands::Curve { curve, output } => {
                let point = curve.evaluate()?;
                let output = output.write()?;
                serde_json::to_writer_pretty(output, &point)?;
            }
            Commands::Generate {
                seed,
                scenario,
                output,
            } => {
                let config = AppConfig::load(self.config.as_deref())?;
                let market = generate::generate_market(&config, seed, scenario.into())?;
                let output = output.write()?;
                serde_json::to_writer_pretty(output, &market)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Nothing to analyze, please request at least one --at-price or --at-quantity")]
    NoAnalysisPoints,
    #[error("Analysis price {0} must be finite")]
    Price(f64),
    #[error("Analysis quantity {0} must be finite and non-negative")]
    Quantity(f64),
    #[error("Please specify a --quantity, a --price, or both")]
    MissingPoint,
}
