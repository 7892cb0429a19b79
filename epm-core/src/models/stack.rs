use super::{Bid, BidRow, Demand, MarginalPrice, Side, SideKind, Supply};
use std::marker::PhantomData;

/// Relative tolerance when checking caller-supplied cumulative quantities
/// against the running total.
const CUMULATIVE_TOLERANCE: f64 = 1e-9;

/// An ordered stack of bids for one side of the market.
///
/// A stack represents a step function price(quantity): the i-th bid covers
/// quantities in `(cumulative_{i-1}, cumulative_i]` at its price. Stacks are
/// guaranteed to satisfy:
/// - every quantity and price is finite, and quantities are positive,
/// - cumulative quantities strictly increase and equal the prefix sums,
/// - prices are non-decreasing for [`Supply`] and non-increasing for [`Demand`].
///
/// An empty stack is valid and has no capacity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BidStackDto", into = "BidStackDto", bound = "")
)]
pub struct BidStack<S: Side> {
    bids: Vec<Bid>,
    side: PhantomData<S>,
}

/// A stack of sell offers
pub type SupplyStack = BidStack<Supply>;

/// A stack of buy bids
pub type DemandStack = BidStack<Demand>;

/// Build a validated stack from `(quantity, price)` rows, computing the
/// cumulative quantities.
pub fn build_bid_stack<S: Side>(
    rows: impl IntoIterator<Item = (f64, f64)>,
) -> Result<BidStack<S>, ValidationError> {
    BidStack::new(rows)
}

impl<S: Side> Default for BidStack<S> {
    fn default() -> Self {
        Self {
            bids: Vec::new(),
            side: PhantomData,
        }
    }
}

impl<S: Side> BidStack<S> {
    /// Creates a stack from rows, validating all constraints
    pub fn new<R: Into<BidRow>>(rows: impl IntoIterator<Item = R>) -> Result<Self, ValidationError> {
        Self::try_from(BidStackDto(rows.into_iter().map(Into::into).collect()))
    }

    /// Creates a stack with no bids
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bids, in stack order
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    /// The number of bids in the stack
    pub fn len(&self) -> usize {
        self.bids.len()
    }

    /// Whether the stack has no bids
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Iterate over the bids in stack order
    pub fn iter(&self) -> std::slice::Iter<'_, Bid> {
        self.bids.iter()
    }

    /// The total capacity of the stack, or 0 if it is empty
    pub fn total_quantity(&self) -> f64 {
        self.bids.last().map_or(0.0, Bid::cumulative_quantity)
    }

    /// The marginal price at `quantity`.
    ///
    /// This is the price of the first bid whose cumulative quantity reaches
    /// `quantity`. Quantities beyond the stack's capacity (or NaN) are
    /// [`MarginalPrice::Exhausted`].
    pub fn price_at(&self, quantity: f64) -> MarginalPrice {
        if quantity.is_nan() {
            return MarginalPrice::Exhausted;
        }
        let index = self
            .bids
            .partition_point(|bid| bid.cumulative_quantity() < quantity);
        self.bids.get(index).map(Bid::price).into()
    }

    /// The quantity this side is willing to trade at `price`.
    ///
    /// Bids are taken in stack order while they accept the price, so the
    /// result is the cumulative quantity of the longest accepting prefix.
    pub fn quantity_at_price(&self, price: f64) -> f64 {
        self.bids
            .iter()
            .take_while(|bid| S::accepts(bid.price(), price))
            .last()
            .map_or(0.0, Bid::cumulative_quantity)
    }
}

impl<'a, S: Side> IntoIterator for &'a BidStack<S> {
    type Item = &'a Bid;
    type IntoIter = std::slice::Iter<'a, Bid>;

    fn into_iter(self) -> Self::IntoIter {
        self.bids.iter()
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Debug, Default)]
pub struct BidStackDto(pub Vec<BidRow>);

impl<S: Side> From<BidStack<S>> for BidStackDto {
    fn from(value: BidStack<S>) -> Self {
        Self(value.bids.iter().map(BidRow::from).collect())
    }
}

impl<S: Side> TryFrom<BidStackDto> for BidStack<S> {
    type Error = ValidationError;

    /// Attempts to create a stack from a DTO, validating all constraints
    ///
    /// # Validation
    ///
    /// For each row in order, this checks that:
    /// 1. No value is NaN or infinite
    /// 2. The quantity is strictly positive
    /// 3. The price respects the side's ordering against the previous row
    /// 4. The running total strictly increases, and agrees with any supplied
    ///    cumulative quantity
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered, tagged with the row index.
    fn try_from(value: BidStackDto) -> Result<Self, Self::Error> {
        let mut bids = Vec::with_capacity(value.0.len());
        let mut total = 0.0;
        let mut prev_price: Option<f64> = None;

        for (index, row) in value.0.into_iter().enumerate() {
            let BidRow {
                quantity,
                price,
                cumulative_quantity,
            } = row;

            if quantity.is_nan() || price.is_nan() || cumulative_quantity.is_some_and(f64::is_nan) {
                return Err(ValidationError::NaN { index });
            }
            if quantity.is_infinite()
                || price.is_infinite()
                || cumulative_quantity.is_some_and(f64::is_infinite)
            {
                return Err(ValidationError::Infinity { index });
            }
            if quantity <= 0.0 {
                return Err(ValidationError::NonPositiveQuantity { index, quantity });
            }
            if let Some(prev) = prev_price {
                if !S::ordered(prev, price) {
                    return Err(ValidationError::NonMonotone {
                        index,
                        side: S::KIND,
                    });
                }
            }

            // A positive quantity can still be absorbed by rounding when it is
            // tiny relative to the running total.
            let cumulative = total + quantity;
            if cumulative <= total {
                return Err(ValidationError::NonIncreasing { index });
            }
            if let Some(found) = cumulative_quantity {
                if (found - cumulative).abs() > CUMULATIVE_TOLERANCE * cumulative.max(1.0) {
                    return Err(ValidationError::InconsistentCumulative {
                        index,
                        expected: cumulative,
                        found,
                    });
                }
            }

            bids.push(Bid::new(quantity, price, cumulative));
            total = cumulative;
            prev_price = Some(price);
        }

        Ok(Self {
            bids,
            side: PhantomData,
        })
    }
}

/// Errors that can occur when creating or validating a bid stack
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Error when any value of a bid is NaN
    #[error("bid {index}: NaN value encountered")]
    NaN {
        /// The offending bid
        index: usize,
    },
    /// Error when any value of a bid is infinite
    #[error("bid {index}: quantities and prices cannot be infinite")]
    Infinity {
        /// The offending bid
        index: usize,
    },
    /// Error when a bid offers zero or negative quantity
    #[error("bid {index}: quantity {quantity} is not positive")]
    NonPositiveQuantity {
        /// The offending bid
        index: usize,
        /// The quantity it offered
        quantity: f64,
    },
    /// Error when prices violate the side's monotonicity requirement
    #[error("bid {index}: {side} prices are not monotone")]
    NonMonotone {
        /// The offending bid
        index: usize,
        /// The side whose ordering was violated
        side: SideKind,
    },
    /// Error when the running total fails to increase
    #[error("bid {index}: cumulative quantity does not increase")]
    NonIncreasing {
        /// The offending bid
        index: usize,
    },
    /// Error when a supplied cumulative quantity disagrees with the prefix sum
    #[error("bid {index}: cumulative quantity {found} disagrees with the running total {expected}")]
    InconsistentCumulative {
        /// The offending bid
        index: usize,
        /// The prefix sum of the quantities
        expected: f64,
        /// The cumulative quantity that was supplied
        found: f64,
    },
}
