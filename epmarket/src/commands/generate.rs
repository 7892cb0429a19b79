use crate::AppConfig;
use epm_solver::{
    Map,
    generate::GeneratorError,
    io::{Market, Scenario, ScenarioId},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{Level, event};

/// A market with a single scenario drawn from the configured generators.
///
/// Without a seed the generator is seeded from the operating system.
pub fn generate_market(
    config: &AppConfig,
    seed: Option<u64>,
    id: ScenarioId,
) -> Result<Market, GeneratorError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let scenario = Scenario {
        supply: config.supply.generate(&mut rng)?,
        demand: config.demand.generate(&mut rng)?,
    };

    event!(
        Level::INFO,
        scenario = %id,
        supply = scenario.supply.len(),
        demand = scenario.demand.len(),
        "generated scenario"
    );

    let mut scenarios = Map::default();
    scenarios.insert(id, scenario);
    Ok(Market { scenarios })
}
