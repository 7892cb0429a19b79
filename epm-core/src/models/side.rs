use std::fmt::{self, Debug};

/// The side of the market a stack of bids or a curve belongs to, as a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SideKind {
    /// Sellers, whose prices are marginal costs
    Supply,
    /// Buyers, whose prices are marginal values
    Demand,
}

impl fmt::Display for SideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supply => f.write_str("supply"),
            Self::Demand => f.write_str("demand"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Supply {}
    impl Sealed for super::Demand {}
}

/// The side of the market as a type.
///
/// [`BidStack`](super::BidStack) is parameterized by its side so that the
/// monotonicity rule is checked once at construction, and so that a supply
/// stack cannot be handed to code expecting demand. The trait is sealed:
/// [`Supply`] and [`Demand`] are the only sides.
pub trait Side: sealed::Sealed + Clone + Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// The runtime tag for this side
    const KIND: SideKind;

    /// Whether a bid priced at `next` may directly follow a bid priced at `prev`.
    fn ordered(prev: f64, next: f64) -> bool;

    /// Whether a bid priced at `bid` is willing to trade at `price`.
    fn accepts(bid: f64, price: f64) -> bool;

    /// The per-unit surplus a bid priced at `bid` earns when trading at `price`.
    ///
    /// Negative when the bid is out of the money.
    fn margin(bid: f64, price: f64) -> f64;
}

/// Marker for the selling side: prices are non-decreasing marginal costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Supply;

/// Marker for the buying side: prices are non-increasing marginal values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Demand;

impl Side for Supply {
    const KIND: SideKind = SideKind::Supply;

    fn ordered(prev: f64, next: f64) -> bool {
        prev <= next
    }

    fn accepts(bid: f64, price: f64) -> bool {
        bid <= price
    }

    fn margin(bid: f64, price: f64) -> f64 {
        price - bid
    }
}

impl Side for Demand {
    const KIND: SideKind = SideKind::Demand;

    fn ordered(prev: f64, next: f64) -> bool {
        prev >= next
    }

    fn accepts(bid: f64, price: f64) -> bool {
        bid >= price
    }

    fn margin(bid: f64, price: f64) -> f64 {
        bid - price
    }
}
