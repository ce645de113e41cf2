use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, RiskError};

/// Tail-risk statistics of one simulation run, expressed as losses against the initial price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    var: f64,
    es: f64,
    confidence: f64,
    tail_count: usize,
}

impl RiskResult {
    pub fn new(var: f64, es: f64, confidence: f64, tail_count: usize) -> Self {
        Self {
            var,
            es,
            confidence,
            tail_count,
        }
    }

    /// Value-at-Risk.
    pub fn var(&self) -> f64 {
        self.var
    }

    /// Expected Shortfall.
    pub fn es(&self) -> f64 {
        self.es
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Number of worst paths that make up the tail.
    pub fn tail_count(&self) -> usize {
        self.tail_count
    }
}

pub fn validate_confidence(confidence: f64) -> Result<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(RiskError::InvalidParameter(format!(
            "confidence level must lie in (0, 1), got {}",
            confidence
        )));
    }
    Ok(())
}

/// Size of the lower tail, `ceil((1 - confidence) * n)` clamped to `[1, n]`.
///
/// `1 - 0.95` is not exactly `0.05` in binary, so the product is pulled down by a
/// relative `1e-12` before rounding up; otherwise `n = 100` would yield a tail of 6.
/// A literal `ceil` (what the reference Julia driver computes) gives 6 there; this
/// function deliberately returns 5.
pub fn tail_count(n_paths: usize, confidence: f64) -> usize {
    let raw = (1.0 - confidence) * n_paths as f64;
    let k = (raw - raw * 1e-12).ceil() as usize;
    k.clamp(1, n_paths.max(1))
}

/// Reduces a buffer of terminal prices into VaR and ES at `confidence`.
///
/// The buffer is sorted in place. VaR is the loss at the `k`-th worst price and
/// ES is the mean loss over the `k` worst prices. A non-finite price is reported as
/// `NonFiniteOutput`, since the parameters that produced it already passed validation.
pub fn reduce(prices: &mut [f64], initial_price: f64, confidence: f64) -> Result<RiskResult> {
    validate_confidence(confidence)?;
    if prices.is_empty() {
        return Err(RiskError::InvalidParameter(
            "cannot reduce an empty price buffer".to_string(),
        ));
    }
    if let Some(bad) = prices.iter().find(|p| !p.is_finite()) {
        return Err(RiskError::NonFiniteOutput(format!(
            "terminal price must be finite, got {}",
            bad
        )));
    }

    prices.sort_unstable_by(f64::total_cmp);

    let k = tail_count(prices.len(), confidence);
    let threshold = prices[k - 1];
    let var = initial_price - threshold;

    // mean excess over the threshold loss, non-negative term by term
    let excess = prices[..k].iter().map(|p| threshold - p).sum::<f64>() / k as f64;
    let es = var + excess;

    Ok(RiskResult::new(var, es, confidence, k))
}
