/// The marginal price of a bid stack at some quantity.
///
/// Beyond the total capacity of a stack there is no bid to set a price. Rather
/// than encode that as an infinite (supply) or zero (demand) number, which
/// would quietly flow into arithmetic, it is a variant of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MarginalPrice {
    /// The price of the bid whose cumulative range contains the quantity
    Bid(f64),
    /// The quantity lies beyond the stack's capacity: unserviceable for
    /// supply, no willingness to pay for demand
    Exhausted,
}

impl MarginalPrice {
    /// The price, if a bid sets one
    pub fn price(self) -> Option<f64> {
        match self {
            Self::Bid(price) => Some(price),
            Self::Exhausted => None,
        }
    }
}

impl From<Option<f64>> for MarginalPrice {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Exhausted, Self::Bid)
    }
}
