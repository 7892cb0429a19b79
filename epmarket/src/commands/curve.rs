use crate::CliError;
use clap::{Args, ValueEnum};
use epm_solver::{CurvePoint, LinearCurve, OperatingPoint, SideKind, curve_point_analytics};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CurveSide {
    Demand,
    Supply,
}

impl From<CurveSide> for SideKind {
    fn from(value: CurveSide) -> Self {
        match value {
            CurveSide::Demand => SideKind::Demand,
            CurveSide::Supply => SideKind::Supply,
        }
    }
}

// p = intercept + slope * q
#[derive(Args)]
pub struct CurveArgs {
    /// Which side of the market the curve describes
    #[arg(long)]
    side: CurveSide,

    /// The price at zero quantity
    #[arg(long, allow_negative_numbers = true)]
    intercept: f64,

    /// The change in price per unit of quantity (negative for demand)
    #[arg(long, allow_negative_numbers = true)]
    slope: f64,

    #[command(flatten)]
    point: PointArgs,
}

// Either coordinate derives the other from the curve; giving both skips the derivation.
#[derive(Args)]
#[group(required = true, multiple = true)]
pub struct PointArgs {
    /// The operating quantity
    #[arg(long)]
    quantity: Option<f64>,

    /// The operating price
    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,
}

impl PointArgs {
    fn operating_point(&self) -> Option<OperatingPoint> {
        match (self.quantity, self.price) {
            (Some(quantity), Some(price)) => Some(OperatingPoint::Exact { quantity, price }),
            (Some(quantity), None) => Some(OperatingPoint::Quantity(quantity)),
            (None, Some(price)) => Some(OperatingPoint::Price(price)),
            (None, None) => None,
        }
    }
}

impl CurveArgs {
    pub fn evaluate(&self) -> anyhow::Result<CurvePoint> {
        let curve = LinearCurve::new(self.side.into(), self.intercept, self.slope)?;
        let at = self.point.operating_point().ok_or(CliError::MissingPoint)?;
        Ok(curve_point_analytics(&curve, at)?)
    }
}
