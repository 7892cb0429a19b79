mod bid;
mod curve;
mod price;
mod side;
mod stack;

pub use bid::{Bid, BidRow};
pub use curve::{CurveError, LinearCurve, LinearCurveDto};
pub use price::MarginalPrice;
pub use side::{Demand, Side, SideKind, Supply};
pub use stack::{BidStack, BidStackDto, DemandStack, SupplyStack, ValidationError, build_bid_stack};
