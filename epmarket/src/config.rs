//! Application configuration management.
//!
//! The only settings that matter to the CLI are those of the random bid
//! generators used by `generate`. They are merged from default values, an
//! optional configuration file, and environment variables.

use epm_solver::generate::BidGenerator;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Settings for the generated sell offers
    #[serde(default = "BidGenerator::supply_default")]
    pub supply: BidGenerator,

    /// Settings for the generated buy bids
    #[serde(default = "BidGenerator::demand_default")]
    pub demand: BidGenerator,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supply: BidGenerator::supply_default(),
            demand: BidGenerator::demand_default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Draw a dozen sell offers
    /// export APP_SUPPLY__NUM_BIDS=12
    ///
    /// # Make buyers more eager
    /// export APP_DEMAND__MAX_PRICE=150
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps APP_SUPPLY__NUM_BIDS to supply.num_bids
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
