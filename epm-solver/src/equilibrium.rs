use epm_core::models::{Bid, DemandStack, MarginalPrice, SupplyStack};
use std::iter::Peekable;
use tracing::{Level, event};

/// The clearing point of the market.
///
/// `(0, 0)` is the no-trade outcome: one of the stacks is empty, or the
/// cheapest supply is dearer than the most valuable demand.
///
/// Bids may name zero or negative prices, and so may the clearing price. A
/// trade at price zero differs from no trade only in its quantity, so use
/// [`Equilibrium::is_trade`] rather than comparing against
/// [`Equilibrium::NO_TRADE`] or testing the price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equilibrium {
    /// The total quantity traded
    pub quantity: f64,
    /// The clearing price
    pub price: f64,
}

impl Equilibrium {
    /// The outcome when nothing trades
    pub const NO_TRADE: Self = Self {
        quantity: 0.0,
        price: 0.0,
    };

    /// Whether any quantity trades at this point
    pub fn is_trade(&self) -> bool {
        self.quantity > 0.0
    }
}

impl Default for Equilibrium {
    fn default() -> Self {
        Self::NO_TRADE
    }
}

/// Which of the stacks steps at a breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Only the supply stack steps here
    Supply,
    /// Only the demand stack steps here
    Demand,
    /// Both stacks step at exactly this quantity
    Both,
}

impl Step {
    /// The clearing price at a breakpoint of this kind.
    ///
    /// When supply steps alone it is the binding constraint, and the marginal
    /// buyer sets the price; when demand steps alone the marginal seller does.
    /// A shared step uses the marginal cost.
    pub fn price(self, supply: f64, demand: f64) -> f64 {
        match self {
            Self::Supply => demand,
            Self::Demand | Self::Both => supply,
        }
    }
}

/// The ascending, de-duplicated union of two stacks' cumulative quantities,
/// tagged by which stack steps there.
///
/// Both inputs are strictly increasing, so a single merge pass suffices.
/// Cumulative quantities are strictly positive, so zero never appears.
pub struct Breakpoints<I: Iterator<Item = f64>, J: Iterator<Item = f64>> {
    supply: Peekable<I>,
    demand: Peekable<J>,
}

/// Merge the breakpoints of a supply and demand stack
pub fn breakpoints<'a>(
    supply: &'a SupplyStack,
    demand: &'a DemandStack,
) -> Breakpoints<impl Iterator<Item = f64> + 'a, impl Iterator<Item = f64> + 'a> {
    Breakpoints {
        supply: supply.iter().map(Bid::cumulative_quantity).peekable(),
        demand: demand.iter().map(Bid::cumulative_quantity).peekable(),
    }
}

impl<I: Iterator<Item = f64>, J: Iterator<Item = f64>> Iterator for Breakpoints<I, J> {
    type Item = (f64, Step);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.supply.peek().copied(), self.demand.peek().copied()) {
            (Some(s), Some(d)) if s < d => {
                self.supply.next();
                Some((s, Step::Supply))
            }
            (Some(s), Some(d)) if d < s => {
                self.demand.next();
                Some((d, Step::Demand))
            }
            (Some(s), Some(_)) => {
                self.supply.next();
                self.demand.next();
                Some((s, Step::Both))
            }
            (Some(s), None) => {
                self.supply.next();
                Some((s, Step::Supply))
            }
            (None, Some(d)) => {
                self.demand.next();
                Some((d, Step::Demand))
            }
            (None, None) => None,
        }
    }
}

/// Whether the market can clear at `quantity`: both sides have capacity there,
/// and the marginal buyer values the unit at least as much as it costs the
/// marginal seller.
pub fn is_feasible(supply: MarginalPrice, demand: MarginalPrice) -> bool {
    match (supply, demand) {
        (MarginalPrice::Bid(s), MarginalPrice::Bid(d)) => d >= s,
        _ => false,
    }
}

/// The candidate clearing point at one breakpoint, if it is feasible
fn candidate(
    supply: &SupplyStack,
    demand: &DemandStack,
    quantity: f64,
    step: Step,
) -> Option<Equilibrium> {
    let s = supply.price_at(quantity);
    let d = demand.price_at(quantity);
    if !is_feasible(s, d) {
        return None;
    }
    let (s, d) = (s.price()?, d.price()?);
    Some(Equilibrium {
        quantity,
        price: step.price(s, d),
    })
}

/// Find the clearing price and quantity of the market.
///
/// This is the largest breakpoint quantity at which demand's marginal price is
/// at least supply's. Since supply prices rise and demand prices fall with
/// quantity, the feasible breakpoints form a prefix of the ascending sequence:
/// the scan stops at the first infeasible one and keeps the last candidate.
pub fn solve_equilibrium(supply: &SupplyStack, demand: &DemandStack) -> Equilibrium {
    let equilibrium = breakpoints(supply, demand)
        .map_while(|(quantity, step)| candidate(supply, demand, quantity, step))
        .last()
        .unwrap_or(Equilibrium::NO_TRADE);

    event!(
        Level::DEBUG,
        supply_bids = supply.len(),
        demand_bids = demand.len(),
        quantity = equilibrium.quantity,
        price = equilibrium.price,
        "solved equilibrium"
    );

    equilibrium
}
