use crate::{AnalysisLog, AnalysisRequest, CliError};
use epm_solver::io::Market;

/// Validate the requested points, prices first and then quantities
pub fn requests(at_price: &[f64], at_quantity: &[f64]) -> Result<Vec<AnalysisRequest>, CliError> {
    if at_price.is_empty() && at_quantity.is_empty() {
        return Err(CliError::NoAnalysisPoints);
    }

    let prices = at_price.iter().map(|&price| {
        if price.is_finite() {
            Ok(AnalysisRequest::AtPrice(price))
        } else {
            Err(CliError::Price(price))
        }
    });
    let quantities = at_quantity.iter().map(|&quantity| {
        if quantity.is_finite() && quantity >= 0.0 {
            Ok(AnalysisRequest::AtQuantity(quantity))
        } else {
            Err(CliError::Quantity(quantity))
        }
    });

    prices.chain(quantities).collect()
}

/// Record every request against every scenario
pub fn analyze(market: &Market, requests: &[AnalysisRequest]) -> AnalysisLog {
    let mut log = AnalysisLog::new();
    for (id, scenario) in &market.scenarios {
        for &request in requests {
            log.record(id, scenario, request);
        }
    }
    log
}
