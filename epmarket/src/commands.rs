use super::{IOArgs, OutputArgs};
use clap::Subcommand;

pub mod analyze;
pub mod clear;
pub mod curve;
pub mod generate;

#[derive(Subcommand)]
pub enum Commands {
    /// Clear every scenario and report its equilibrium and welfare
    Clear {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Report the welfare of trading at prices or quantities of your choosing
    Analyze {
        #[command(flatten)]
        io: IOArgs,

        /// Force trade at this price (may be repeated)
        #[arg(long, allow_negative_numbers = true)]
        at_price: Vec<f64>,

        /// Force trade of this quantity (may be repeated)
        #[arg(long)]
        at_quantity: Vec<f64>,
    },

    /// Evaluate a linear demand or supply curve at a single point
    Curve {
        #[command(flatten)]
        curve: curve::CurveArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write a market file with one randomly generated scenario
    Generate {
        /// Seed the generator for a reproducible market
        #[arg(long)]
        seed: Option<u64>,

        /// The name of the generated scenario
        #[arg(long, default_value = "generated")]
        scenario: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}
