use epm_core::models::{BidStack, DemandStack, Side, SupplyStack};

/// The split of economic surplus between buyers and sellers.
///
/// The total is always the sum of the two parts; it is never computed on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Welfare {
    consumer_surplus: f64,
    producer_surplus: f64,
    total_welfare: f64,
}

impl Welfare {
    /// Combine a consumer and producer surplus
    pub fn new(consumer_surplus: f64, producer_surplus: f64) -> Self {
        Self {
            consumer_surplus,
            producer_surplus,
            total_welfare: consumer_surplus + producer_surplus,
        }
    }

    /// The buyers' benefit above the price they pay
    pub fn consumer_surplus(&self) -> f64 {
        self.consumer_surplus
    }

    /// The sellers' benefit above their offered cost
    pub fn producer_surplus(&self) -> f64 {
        self.producer_surplus
    }

    /// The sum of consumer and producer surplus
    pub fn total_welfare(&self) -> f64 {
        self.total_welfare
    }
}

/// The surplus of one stack when `quantity` trades at `price`.
///
/// Each bid is a constant-price rectangle, so the area between the step
/// function and the price is a sum over the accepted portion of each bid.
/// Bids at or beyond the price contribute nothing.
pub fn stack_surplus<S: Side>(stack: &BidStack<S>, price: f64, quantity: f64) -> f64 {
    let mut surplus = 0.0;
    let mut visited = 0.0;

    for bid in stack {
        if visited >= quantity {
            break;
        }

        let accepted = bid.cumulative_quantity().min(quantity) - visited;
        let margin = S::margin(bid.price(), price);
        if accepted > 0.0 && margin > 0.0 {
            surplus += margin * accepted;
        }

        visited = bid.cumulative_quantity();
    }

    surplus
}

/// Decompose the welfare of trading `quantity` at `price`.
///
/// The point need not be the equilibrium, which allows "what if the market
/// cleared here" comparisons. A non-positive quantity trades nothing and has
/// no welfare.
pub fn compute_welfare(
    supply: &SupplyStack,
    demand: &DemandStack,
    price: f64,
    quantity: f64,
) -> Welfare {
    // also catches a NaN quantity
    if !(quantity > 0.0) {
        return Welfare::default();
    }

    Welfare::new(
        stack_surplus(demand, price, quantity),
        stack_surplus(supply, price, quantity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use epm_core::models::build_bid_stack;

    #[test]
    fn partial_bid_acceptance() {
        let demand: DemandStack = build_bid_stack([(5.0, 30.0), (5.0, 20.0)]).unwrap();
        // 5 units at a margin of 15, then 2 of the next 5 at a margin of 5
        assert_eq!(stack_surplus(&demand, 15.0, 7.0), 85.0);
    }

    #[test]
    fn out_of_money_bids() {
        let supply: SupplyStack = build_bid_stack([(5.0, 10.0), (5.0, 20.0)]).unwrap();
        // the second bid is exactly at the price and earns nothing
        assert_eq!(stack_surplus(&supply, 20.0, 10.0), 50.0);
        assert_eq!(stack_surplus(&supply, 5.0, 10.0), 0.0);
    }

    #[test]
    fn quantity_beyond_capacity() {
        let supply: SupplyStack = build_bid_stack([(5.0, 10.0)]).unwrap();
        assert_eq!(stack_surplus(&supply, 20.0, 50.0), 50.0);
    }

    #[test]
    fn non_positive_quantity() {
        let supply = build_bid_stack([(5.0, 10.0)]).unwrap();
        let demand = build_bid_stack([(5.0, 30.0)]).unwrap();
        assert_eq!(compute_welfare(&supply, &demand, 20.0, 0.0), Welfare::default());
        assert_eq!(compute_welfare(&supply, &demand, 20.0, -1.0), Welfare::default());
        assert_eq!(compute_welfare(&supply, &demand, 20.0, f64::NAN), Welfare::default());
    }
}
