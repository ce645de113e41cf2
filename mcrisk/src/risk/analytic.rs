use statrs::distribution::{ContinuousCDF, Normal};

use crate::models::gbm::GbmParameters;
use crate::risk::reduction::{validate_confidence, RiskResult};
use crate::utils::errors::{Result, RiskError};

/// Closed-form VaR and ES of the lognormal terminal price of a GBM.
///
/// With `z = Phi^-1(1 - confidence)` and `v = sigma sqrt(T)`:
///
/// ```text
/// VaR = S0 - S0 exp((mu - sigma^2 / 2) T + v z)
/// ES  = S0 - S0 exp(mu T) Phi(z - v) / (1 - confidence)
/// ```
pub fn lognormal_tail_risk(params: &GbmParameters, confidence: f64) -> Result<RiskResult> {
    params.validate()?;
    validate_confidence(confidence)?;

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| RiskError::InvalidParameter(format!("standard normal: {}", e)))?;
    let tail = 1.0 - confidence;
    let z = normal.inverse_cdf(tail);
    let vol = params.sigma * params.horizon.sqrt();

    let quantile = params.s0
        * ((params.mu - 0.5 * params.sigma * params.sigma) * params.horizon + vol * z).exp();
    let var = params.s0 - quantile;

    let es = if vol > 0.0 {
        let tail_mean = params.s0 * (params.mu * params.horizon).exp() * normal.cdf(z - vol) / tail;
        params.s0 - tail_mean
    } else {
        var
    };

    Ok(RiskResult::new(var, es, confidence, 0))
}
