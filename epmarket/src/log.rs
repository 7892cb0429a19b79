use epm_solver::{
    AnalysisPoint, Map, WelfareChange, analyze_at_price, analyze_at_quantity,
    io::{Scenario, ScenarioId},
};
use serde::Serialize;

/// A point an analyst asked about
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisRequest {
    /// Force the market to trade at this price
    AtPrice(f64),
    /// Force the market to trade this quantity
    AtQuantity(f64),
}

impl AnalysisRequest {
    pub fn evaluate(self, scenario: &Scenario) -> AnalysisPoint {
        match self {
            Self::AtPrice(price) => analyze_at_price(&scenario.supply, &scenario.demand, price),
            Self::AtQuantity(quantity) => {
                analyze_at_quantity(&scenario.supply, &scenario.demand, quantity)
            }
        }
    }
}

/// One recorded analysis
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalysisEntry {
    pub request: AnalysisRequest,
    pub result: AnalysisPoint,
    /// The welfare at `result` relative to the scenario's equilibrium
    pub versus_equilibrium: WelfareChange,
}

/// Analyses accumulated across requests, grouped by scenario.
///
/// Entries are only ever appended, so each scenario's entries are in the order
/// they were requested. The solver itself stays stateless; this log is the
/// only place analysis history lives.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisLog(Map<ScenarioId, Vec<AnalysisEntry>>);

impl AnalysisLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `request` against `scenario`, compare it with the scenario's
    /// equilibrium, and append the result under `id`
    pub fn record(
        &mut self,
        id: &ScenarioId,
        scenario: &Scenario,
        request: AnalysisRequest,
    ) -> AnalysisEntry {
        let result = request.evaluate(scenario);
        let entry = AnalysisEntry {
            request,
            result,
            versus_equilibrium: scenario.clear().compare(&result),
        };
        self.0.entry(id.clone()).or_default().push(entry);
        entry
    }

    /// The entries recorded for a scenario, oldest first
    pub fn entries(&self, id: &ScenarioId) -> &[AnalysisEntry] {
        self.0.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over the scenarios in the order they were first analyzed
    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioId, &[AnalysisEntry])> {
        self.0.iter().map(|(id, entries)| (id, entries.as_slice()))
    }

    /// The total number of entries across all scenarios
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epm_solver::{Welfare, build_bid_stack};

    fn scenario() -> Scenario {
        Scenario {
            supply: build_bid_stack([(5.0, 10.0), (5.0, 20.0)]).unwrap(),
            demand: build_bid_stack([(5.0, 30.0), (5.0, 15.0)]).unwrap(),
        }
    }

    #[test]
    fn appends_in_order() {
        let scenario = scenario();
        let (a, b) = (ScenarioId::from("a"), ScenarioId::from("b"));
        let mut log = AnalysisLog::new();
        assert!(log.is_empty());

        log.record(&b, &scenario, AnalysisRequest::AtPrice(25.0));
        log.record(&a, &scenario, AnalysisRequest::AtQuantity(7.0));
        let last = log.record(&b, &scenario, AnalysisRequest::AtPrice(12.0));
        assert_eq!(last.result.welfare, Welfare::new(90.0, 10.0));
        assert_eq!(last.versus_equilibrium.consumer_surplus.absolute, -10.0);
        assert_eq!(last.versus_equilibrium.consumer_surplus.percentage, -10.0);

        assert_eq!(log.len(), 3);
        let ids = log.iter().map(|(id, _)| id.clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![b.clone(), a.clone()]);

        let requests = log
            .entries(&b)
            .iter()
            .map(|entry| entry.request)
            .collect::<Vec<_>>();
        assert_eq!(
            requests,
            vec![AnalysisRequest::AtPrice(25.0), AnalysisRequest::AtPrice(12.0)]
        );
        assert!(log.entries(&ScenarioId::from("c")).is_empty());
    }

    #[test]
    fn serializes_by_scenario() {
        let mut log = AnalysisLog::new();
        log.record(
            &ScenarioId::from("base"),
            &scenario(),
            AnalysisRequest::AtQuantity(7.0),
        );
        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["base"][0]["request"]["at_quantity"], 7.0);
        assert_eq!(value["base"][0]["result"]["price"], 20.0);
        assert_eq!(value["base"][0]["result"]["welfare"]["total_welfare"], 100.0);
        assert_eq!(
            value["base"][0]["versus_equilibrium"]["producer_surplus"]["absolute"],
            50.0
        );
    }
}
