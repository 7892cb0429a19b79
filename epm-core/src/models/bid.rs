/// A single indivisible offer within a [`BidStack`](super::BidStack).
///
/// Bids only exist inside a validated stack, so the fields are read-only: the
/// cumulative quantity is the prefix sum of quantities up to and including
/// this bid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bid {
    quantity: f64,
    price: f64,
    cumulative_quantity: f64,
}

impl Bid {
    pub(super) fn new(quantity: f64, price: f64, cumulative_quantity: f64) -> Self {
        Self {
            quantity,
            price,
            cumulative_quantity,
        }
    }

    /// The offered quantity (MWh), always positive
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// The offered price (currency/MWh)
    pub fn price(&self) -> f64 {
        self.price
    }

    /// The running total of quantity through this bid
    pub fn cumulative_quantity(&self) -> f64 {
        self.cumulative_quantity
    }
}

/// One row of raw bid input, as supplied by a caller or a file.
///
/// The cumulative quantity is optional. When present it is checked against
/// the prefix sum of the quantities, otherwise it is computed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidRow {
    /// The offered quantity
    pub quantity: f64,
    /// The offered price
    pub price: f64,
    /// The running total of quantity through this row, if known
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub cumulative_quantity: Option<f64>,
}

impl From<(f64, f64)> for BidRow {
    fn from((quantity, price): (f64, f64)) -> Self {
        Self {
            quantity,
            price,
            cumulative_quantity: None,
        }
    }
}

impl From<&Bid> for BidRow {
    fn from(bid: &Bid) -> Self {
        Self {
            quantity: bid.quantity,
            price: bid.price,
            cumulative_quantity: Some(bid.cumulative_quantity),
        }
    }
}
