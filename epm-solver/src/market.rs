use crate::{Equilibrium, Welfare, compute_welfare, solve_equilibrium};
use epm_core::models::{DemandStack, MarginalPrice, SupplyStack};
use tracing::{Level, event};

/// The clearing point of a market together with its welfare decomposition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketOutcome {
    /// The clearing price and quantity
    pub equilibrium: Equilibrium,
    /// The surplus split at the clearing point
    pub welfare: Welfare,
}

/// Clear the market and decompose the welfare at the clearing point.
///
/// This is the natural unit of work for one scenario. It has no side effects,
/// so independent scenarios can be cleared in parallel without coordination.
pub fn clear_market(supply: &SupplyStack, demand: &DemandStack) -> MarketOutcome {
    let equilibrium = solve_equilibrium(supply, demand);
    let welfare = compute_welfare(supply, demand, equilibrium.price, equilibrium.quantity);
    MarketOutcome {
        equilibrium,
        welfare,
    }
}

impl MarketOutcome {
    /// How the welfare at `point` differs from the welfare at this outcome
    pub fn compare(&self, point: &AnalysisPoint) -> WelfareChange {
        WelfareChange::between(&self.welfare, &point.welfare)
    }
}

/// The change in one welfare figure relative to a baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Change {
    /// The new value less the baseline
    pub absolute: f64,
    /// The absolute change as a percentage of the baseline, or zero when the
    /// baseline is not positive
    pub percentage: f64,
}

impl Change {
    /// The change from `baseline` to `value`
    pub fn between(baseline: f64, value: f64) -> Self {
        let absolute = value - baseline;
        let percentage = if baseline > 0.0 {
            absolute / baseline * 100.0
        } else {
            0.0
        };
        Self {
            absolute,
            percentage,
        }
    }
}

/// How far the welfare at some point is from a baseline, usually the
/// equilibrium. Negative changes are welfare lost by not clearing there.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WelfareChange {
    /// The change in consumer surplus
    pub consumer_surplus: Change,
    /// The change in producer surplus
    pub producer_surplus: Change,
    /// The change in total welfare
    pub total_welfare: Change,
}

impl WelfareChange {
    /// The change from `baseline` to `welfare`, figure by figure
    pub fn between(baseline: &Welfare, welfare: &Welfare) -> Self {
        Self {
            consumer_surplus: Change::between(
                baseline.consumer_surplus(),
                welfare.consumer_surplus(),
            ),
            producer_surplus: Change::between(
                baseline.producer_surplus(),
                welfare.producer_surplus(),
            ),
            total_welfare: Change::between(baseline.total_welfare(), welfare.total_welfare()),
        }
    }
}

/// The welfare at an off-equilibrium point chosen by the analyst.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalysisPoint {
    /// The price used for the analysis
    pub price: f64,
    /// The quantity traded at that price
    pub quantity: f64,
    /// The surplus split at this point
    pub welfare: Welfare,
}

/// What happens if the market is forced to trade at `price`.
///
/// Each side offers the bids willing to trade at that price, and the short
/// side determines the quantity.
pub fn analyze_at_price(supply: &SupplyStack, demand: &DemandStack, price: f64) -> AnalysisPoint {
    let quantity = supply
        .quantity_at_price(price)
        .min(demand.quantity_at_price(price));
    let welfare = compute_welfare(supply, demand, price, quantity);

    event!(Level::DEBUG, price, quantity, "analyzed price");

    AnalysisPoint {
        price,
        quantity,
        welfare,
    }
}

/// What happens if the market is forced to trade `quantity`.
///
/// The price is the marginal cost of supply at that quantity. Past the end of
/// the supply stack the marginal buyer's price is used instead, and past both
/// stacks the price is zero.
pub fn analyze_at_quantity(
    supply: &SupplyStack,
    demand: &DemandStack,
    quantity: f64,
) -> AnalysisPoint {
    let price = match (supply.price_at(quantity), demand.price_at(quantity)) {
        (MarginalPrice::Bid(price), _) | (MarginalPrice::Exhausted, MarginalPrice::Bid(price)) => {
            price
        }
        (MarginalPrice::Exhausted, MarginalPrice::Exhausted) => 0.0,
    };
    let welfare = compute_welfare(supply, demand, price, quantity);

    event!(Level::DEBUG, price, quantity, "analyzed quantity");

    AnalysisPoint {
        price,
        quantity,
        welfare,
    }
}
