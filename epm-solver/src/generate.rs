//! Random bid stacks.
//!
//! Teaching scenarios need plausible stacks rather than realistic ones: a
//! handful of bids with quantities and prices drawn uniformly from a range,
//! rounded to one decimal place, and sorted so that the stack is monotone for
//! its side.

use epm_core::models::{BidStack, Side, SideKind, ValidationError};
use rand::Rng;

/// Settings for drawing a random bid stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidGenerator {
    /// How many bids to draw
    pub num_bids: usize,
    /// The smallest quantity a bid may offer
    pub min_quantity: f64,
    /// The largest quantity a bid may offer
    pub max_quantity: f64,
    /// The lowest price a bid may name
    pub min_price: f64,
    /// The highest price a bid may name
    pub max_price: f64,
}

impl BidGenerator {
    /// Ten cheap-to-moderate sell offers
    pub fn supply_default() -> Self {
        Self {
            num_bids: 10,
            min_quantity: 1.0,
            max_quantity: 10.0,
            min_price: 10.0,
            max_price: 80.0,
        }
    }

    /// Ten moderate-to-valuable buy bids
    pub fn demand_default() -> Self {
        Self {
            num_bids: 10,
            min_quantity: 1.0,
            max_quantity: 10.0,
            min_price: 30.0,
            max_price: 100.0,
        }
    }

    /// Check that the settings can produce a valid stack
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_bids == 0 {
            return Err(GeneratorError::NoBids);
        }
        let finite = [
            self.min_quantity,
            self.max_quantity,
            self.min_price,
            self.max_price,
        ]
        .iter()
        .all(|x| x.is_finite());
        if !finite {
            return Err(GeneratorError::NonFinite);
        }
        // quantities are rounded, so the smallest one must survive rounding
        if round_tenth(self.min_quantity) <= 0.0 {
            return Err(GeneratorError::Quantity(self.min_quantity));
        }
        if self.min_quantity > self.max_quantity {
            return Err(GeneratorError::Range {
                min: self.min_quantity,
                max: self.max_quantity,
            });
        }
        if self.min_price > self.max_price {
            return Err(GeneratorError::Range {
                min: self.min_price,
                max: self.max_price,
            });
        }
        Ok(())
    }

    /// Draw a stack for side `S`
    pub fn generate<S: Side, R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<BidStack<S>, GeneratorError> {
        self.validate()?;

        let quantities = (0..self.num_bids)
            .map(|_| round_tenth(rng.random_range(self.min_quantity..=self.max_quantity)))
            .collect::<Vec<_>>();

        let mut prices = (0..self.num_bids)
            .map(|_| round_tenth(rng.random_range(self.min_price..=self.max_price)))
            .collect::<Vec<_>>();
        prices.sort_by(f64::total_cmp);
        if S::KIND == SideKind::Demand {
            prices.reverse();
        }

        Ok(BidStack::new(quantities.into_iter().zip(prices))?)
    }
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Errors that can occur when generating a bid stack
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    /// Error when no bids are requested
    #[error("at least one bid is required")]
    NoBids,
    /// Error when a bound is NaN or infinite
    #[error("ranges must be finite")]
    NonFinite,
    /// Error when the smallest quantity would round to nothing
    #[error("minimum quantity {0} must be at least 0.05")]
    Quantity(f64),
    /// Error when a range is inverted
    #[error("range is inverted: {min} > {max}")]
    Range {
        /// The lower bound
        min: f64,
        /// The upper bound
        max: f64,
    },
    /// Error when the drawn bids do not form a valid stack
    #[error("invalid stack: {0}")]
    Stack(#[from] ValidationError),
}
