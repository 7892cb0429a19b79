use epm_solver::{
    Map, MarketOutcome,
    io::{Market, ScenarioId},
};
use tracing::{Level, event};

/// Clear every scenario of the market on the blocking pool.
///
/// Scenarios share nothing, so each gets its own task; the outcomes are
/// collected in the order the scenarios were given.
pub async fn clear_parallel(market: Market) -> anyhow::Result<Map<ScenarioId, MarketOutcome>> {
    let tasks = market
        .scenarios
        .into_iter()
        .map(|(id, scenario)| (id, tokio::task::spawn_blocking(move || scenario.clear())))
        .collect::<Vec<_>>();

    let mut outcomes = Map::default();
    for (id, task) in tasks {
        let outcome = task.await?;
        event!(
            Level::INFO,
            scenario = %id,
            quantity = outcome.equilibrium.quantity,
            price = outcome.equilibrium.price,
            welfare = outcome.welfare.total_welfare(),
            "cleared scenario"
        );
        outcomes.insert(id, outcome);
    }

    Ok(outcomes)
}
