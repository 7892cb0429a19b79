use super::SideKind;

/// A continuous linear curve `price(q) = intercept + slope * q`.
///
/// Demand curves slope strictly downwards. Supply curves slope upwards or are
/// horizontal. The curve is only meaningful for non-negative quantities, and
/// a demand curve additionally stops at its choke quantity where the price
/// reaches zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LinearCurveDto", into = "LinearCurveDto")
)]
pub struct LinearCurve {
    side: SideKind,
    intercept: f64,
    slope: f64,
}

impl LinearCurve {
    /// Creates a curve for the given side, validating the parameters
    pub fn new(side: SideKind, intercept: f64, slope: f64) -> Result<Self, CurveError> {
        Self::try_from(LinearCurveDto {
            side,
            intercept,
            slope,
        })
    }

    /// Creates a downward-sloping demand curve
    pub fn demand(intercept: f64, slope: f64) -> Result<Self, CurveError> {
        Self::new(SideKind::Demand, intercept, slope)
    }

    /// Creates an upward-sloping (or horizontal) supply curve
    pub fn supply(intercept: f64, slope: f64) -> Result<Self, CurveError> {
        Self::new(SideKind::Supply, intercept, slope)
    }

    /// The side of the market this curve describes
    pub fn side(&self) -> SideKind {
        self.side
    }

    /// The price at zero quantity
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// The (constant) rate of change of price with quantity
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// The price on the curve at `quantity`
    pub fn price_at(&self, quantity: f64) -> f64 {
        self.intercept + self.slope * quantity
    }

    /// The largest quantity a demand curve covers, where its price falls to zero.
    ///
    /// Supply curves are unbounded and return `None`.
    pub fn choke_quantity(&self) -> Option<f64> {
        match self.side {
            SideKind::Demand => Some((self.intercept / self.slope.abs()).max(0.0)),
            SideKind::Supply => None,
        }
    }

    /// The quantity on the curve at `price`, clamped to the curve's domain.
    ///
    /// # Errors
    ///
    /// A horizontal curve has no single quantity for a price, and a
    /// non-finite price has no quantity at all.
    pub fn quantity_at(&self, price: f64) -> Result<f64, CurveError> {
        if !price.is_finite() {
            return Err(CurveError::Price(price));
        }
        if self.slope == 0.0 {
            return Err(CurveError::Indeterminate(price));
        }

        let quantity = (price - self.intercept) / self.slope;
        let quantity = match self.choke_quantity() {
            Some(choke) => quantity.min(choke),
            None => quantity,
        };
        Ok(quantity.max(0.0))
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearCurveDto {
    /// The side of the market
    pub side: SideKind,
    /// The price at zero quantity
    pub intercept: f64,
    /// The rate of change of price with quantity
    pub slope: f64,
}

impl From<LinearCurve> for LinearCurveDto {
    fn from(value: LinearCurve) -> Self {
        Self {
            side: value.side,
            intercept: value.intercept,
            slope: value.slope,
        }
    }
}

impl TryFrom<LinearCurveDto> for LinearCurve {
    type Error = CurveError;

    fn try_from(value: LinearCurveDto) -> Result<Self, Self::Error> {
        let LinearCurveDto {
            side,
            intercept,
            slope,
        } = value;

        if !intercept.is_finite() || !slope.is_finite() {
            return Err(CurveError::NonFinite);
        }

        let ok = match side {
            SideKind::Demand => slope < 0.0,
            SideKind::Supply => slope >= 0.0,
        };
        if ok {
            Ok(Self {
                side,
                intercept,
                slope,
            })
        } else {
            Err(CurveError::Slope { side, slope })
        }
    }
}

/// Errors that can occur when constructing or evaluating a linear curve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Error when the intercept or slope is NaN or infinite
    #[error("intercept and slope must be finite")]
    NonFinite,
    /// Error when the slope has the wrong sign for the side
    #[error("a {side} curve cannot have slope {slope}")]
    Slope {
        /// The side of the curve
        side: SideKind,
        /// The rejected slope
        slope: f64,
    },
    /// Error when an operating quantity is negative or not finite
    #[error("quantity {0} is not a finite, non-negative value")]
    Quantity(f64),
    /// Error when an operating price is negative or not finite
    #[error("price {0} is not a finite, non-negative value")]
    Price(f64),
    /// Error when a quantity is requested from a horizontal curve
    #[error("a horizontal curve has no unique quantity at price {0}")]
    Indeterminate(f64),
}
