use epm_core::models::{CurveError, LinearCurve, SideKind};
use std::fmt;
use tracing::{Level, event};

/// Where on a curve to evaluate it.
///
/// Usually only one coordinate is known and the other is read off the curve.
/// `Exact` passes both through unchanged, and the caller is responsible for
/// the point lying on the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OperatingPoint {
    /// A quantity; the price is derived from the curve
    Quantity(f64),
    /// A price; the quantity is derived from the curve
    Price(f64),
    /// Both coordinates, already consistent with the curve
    Exact {
        /// The operating quantity
        quantity: f64,
        /// The operating price
        price: f64,
    },
}

/// Areas under a demand curve at an operating point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConsumerAreas {
    /// The area under the curve from zero to the operating quantity
    pub gross_surplus: f64,
    /// What the buyer pays, price × quantity
    pub expenses: f64,
    /// Gross surplus less expenses
    pub net_surplus: f64,
    /// Expenses as a percentage of gross surplus
    pub expenses_percentage: f64,
    /// Net surplus as a percentage of gross surplus
    pub net_surplus_percentage: f64,
}

/// Areas under a supply curve at an operating point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProducerAreas {
    /// What the seller receives, price × quantity
    pub revenue: f64,
    /// The area under the curve from zero to the operating quantity
    pub cost: f64,
    /// Revenue less cost
    pub profit: f64,
    /// Cost as a percentage of revenue
    pub cost_percentage: f64,
    /// Profit as a percentage of revenue
    pub profit_percentage: f64,
}

/// The area under `intercept + slope * q` from zero to `quantity`
fn integral(intercept: f64, slope: f64, quantity: f64) -> f64 {
    intercept * quantity + 0.5 * slope * quantity * quantity
}

/// `part` as a percentage of `base`, or zero when there is no base to speak of
fn percentage(part: f64, base: f64) -> f64 {
    if base > 0.0 { part / base * 100.0 } else { 0.0 }
}

impl ConsumerAreas {
    /// Compute the consumer's areas at `(price, quantity)` on the given line
    pub fn new(intercept: f64, slope: f64, price: f64, quantity: f64) -> Self {
        let gross_surplus = integral(intercept, slope, quantity);
        let expenses = price * quantity;
        let net_surplus = gross_surplus - expenses;
        Self {
            gross_surplus,
            expenses,
            net_surplus,
            expenses_percentage: percentage(expenses, gross_surplus),
            net_surplus_percentage: percentage(net_surplus, gross_surplus),
        }
    }
}

impl ProducerAreas {
    /// Compute the producer's areas at `(price, quantity)` on the given line
    pub fn new(intercept: f64, slope: f64, price: f64, quantity: f64) -> Self {
        let revenue = price * quantity;
        let cost = integral(intercept, slope, quantity);
        let profit = revenue - cost;
        Self {
            revenue,
            cost,
            profit,
            cost_percentage: percentage(cost, revenue),
            profit_percentage: percentage(profit, revenue),
        }
    }
}

/// The side-specific areas of a curve point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum CurveAreas {
    /// Gross surplus, expenses and net surplus of a buyer
    Demand(ConsumerAreas),
    /// Revenue, cost and profit of a seller
    Supply(ProducerAreas),
}

/// Point price-elasticity of a curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum Elasticity {
    /// A finite elasticity, negative for demand curves
    Finite(f64),
    /// At zero quantity, or on a horizontal curve
    Infinite,
}

/// The usual reading of an elasticity's magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ElasticityCategory {
    /// |ε| > 1: quantity responds more than proportionally to price
    Elastic,
    /// |ε| = 1
    UnitElastic,
    /// |ε| < 1: quantity responds less than proportionally to price
    Inelastic,
}

impl fmt::Display for ElasticityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elastic => f.write_str("Elastic"),
            Self::UnitElastic => f.write_str("Unit Elastic"),
            Self::Inelastic => f.write_str("Inelastic"),
        }
    }
}

/// The point elasticity `(price / quantity) / slope` of a linear curve.
///
/// Zero quantity or zero slope give [`Elasticity::Infinite`] rather than a
/// division by zero.
pub fn point_elasticity(slope: f64, price: f64, quantity: f64) -> Elasticity {
    if quantity == 0.0 || slope == 0.0 {
        Elasticity::Infinite
    } else {
        Elasticity::Finite((price / quantity) / slope)
    }
}

impl Elasticity {
    /// The finite value, if there is one
    pub fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::Infinite => None,
        }
    }

    /// Classify by magnitude. An infinite elasticity is elastic.
    pub fn category(self) -> ElasticityCategory {
        match self {
            Self::Infinite => ElasticityCategory::Elastic,
            Self::Finite(value) => {
                let magnitude = value.abs();
                if magnitude > 1.0 {
                    ElasticityCategory::Elastic
                } else if magnitude == 1.0 {
                    ElasticityCategory::UnitElastic
                } else {
                    ElasticityCategory::Inelastic
                }
            }
        }
    }
}

/// Slope and elasticity at a curve point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElasticityView {
    /// The curve's slope, constant along the line
    pub slope: f64,
    /// The point elasticity
    pub elasticity: Elasticity,
    /// The elasticity's classification
    pub category: ElasticityCategory,
}

/// Everything the teaching views report for one point on a linear curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurvePoint {
    /// The operating quantity
    pub quantity: f64,
    /// The operating price
    pub price: f64,
    /// Surplus or profit areas
    pub areas: CurveAreas,
    /// Slope and point elasticity
    pub elasticity: ElasticityView,
}

/// Evaluate a linear curve at an operating point.
///
/// A missing coordinate is derived from the curve. Both derivations are
/// clamped to a demand curve's domain: a quantity at or past the choke
/// quantity is evaluated at the choke quantity with a price of zero, just as a
/// price of zero yields the choke quantity.
///
/// # Errors
///
/// Fails for a negative or non-finite quantity or price (given or derived, as
/// on a supply curve with a negative intercept), or a price on a horizontal
/// curve (which fixes no quantity).
pub fn curve_point_analytics(
    curve: &LinearCurve,
    at: OperatingPoint,
) -> Result<CurvePoint, CurveError> {
    let (quantity, price) = match at {
        OperatingPoint::Quantity(quantity) => {
            check_quantity(quantity)?;
            let (quantity, price) = match curve.choke_quantity() {
                // nobody pays anything past the choke quantity
                Some(choke) if quantity >= choke => (choke, 0.0),
                _ => (quantity, curve.price_at(quantity)),
            };
            check_price(price)?;
            (quantity, price)
        }
        OperatingPoint::Price(price) => {
            check_price(price)?;
            (curve.quantity_at(price)?, price)
        }
        OperatingPoint::Exact { quantity, price } => {
            check_quantity(quantity)?;
            check_price(price)?;
            (quantity, price)
        }
    };

    let (intercept, slope) = (curve.intercept(), curve.slope());
    let areas = match curve.side() {
        SideKind::Demand => CurveAreas::Demand(ConsumerAreas::new(intercept, slope, price, quantity)),
        SideKind::Supply => CurveAreas::Supply(ProducerAreas::new(intercept, slope, price, quantity)),
    };
    let elasticity = point_elasticity(slope, price, quantity);

    event!(
        Level::DEBUG,
        side = %curve.side(),
        quantity,
        price,
        "evaluated curve point"
    );

    Ok(CurvePoint {
        quantity,
        price,
        areas,
        elasticity: ElasticityView {
            slope,
            elasticity,
            category: elasticity.category(),
        },
    })
}

fn check_quantity(quantity: f64) -> Result<(), CurveError> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(CurveError::Quantity(quantity))
    }
}

fn check_price(price: f64) -> Result<(), CurveError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CurveError::Price(price))
    }
}
