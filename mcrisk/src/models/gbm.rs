use serde::{Deserialize, Serialize};

use crate::models::randomnumbers::RandomNumberGenerator;
use crate::utils::errors::{Result, RiskError};

/// Parameters of a geometric Brownian motion for a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmParameters {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
    pub horizon: f64,
    pub n_steps: usize,
}

impl GbmParameters {
    pub fn new(s0: f64, mu: f64, sigma: f64, horizon: f64, n_steps: usize) -> Result<Self> {
        let params = Self {
            s0,
            mu,
            sigma,
            horizon,
            n_steps,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.s0.is_finite() || self.s0 <= 0.0 {
            return Err(RiskError::InvalidParameter(format!(
                "initial price must be positive, got {}",
                self.s0
            )));
        }
        if !self.mu.is_finite() {
            return Err(RiskError::InvalidParameter(format!(
                "drift must be finite, got {}",
                self.mu
            )));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(RiskError::InvalidParameter(format!(
                "volatility must be non-negative, got {}",
                self.sigma
            )));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(RiskError::InvalidParameter(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        if self.n_steps < 1 {
            return Err(RiskError::InvalidParameter(
                "at least one time step is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn dt(&self) -> f64 {
        self.horizon / self.n_steps as f64
    }
}

/// Exact-transition GBM path simulator.
///
/// Each step multiplies the price by `exp((mu - sigma^2 / 2) dt + sigma sqrt(dt) z)`,
/// so the terminal law is lognormal for any number of steps.
#[derive(Debug, Clone, Copy)]
pub struct GbmPathSimulator {
    params: GbmParameters,
    step_drift: f64,
    step_diffusion: f64,
}

impl GbmPathSimulator {
    pub fn new(params: GbmParameters) -> Result<Self> {
        params.validate()?;
        let dt = params.dt();
        Ok(Self {
            params,
            step_drift: (params.mu - 0.5 * params.sigma * params.sigma) * dt,
            step_diffusion: params.sigma * dt.sqrt(),
        })
    }

    pub fn params(&self) -> &GbmParameters {
        &self.params
    }

    /// Advances one path to the horizon and returns its terminal price.
    pub fn simulate<R: RandomNumberGenerator>(&self, rng: &mut R) -> f64 {
        let mut price = self.params.s0;
        for _ in 0..self.params.n_steps {
            let z = rng.gen_normal();
            price *= self.step_diffusion.mul_add(z, self.step_drift).exp();
        }
        price
    }
}

/// Validates `params` and simulates a single terminal price.
pub fn simulate_path<R: RandomNumberGenerator>(params: &GbmParameters, rng: &mut R) -> Result<f64> {
    Ok(GbmPathSimulator::new(*params)?.simulate(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::randomnumbers::RandomStream;

    struct ScriptedNormals {
        draws: Vec<f64>,
        next: usize,
    }

    impl RandomNumberGenerator for ScriptedNormals {
        fn gen_normal(&mut self) -> f64 {
            let z = self.draws[self.next % self.draws.len()];
            self.next += 1;
            z
        }
    }

    fn params() -> GbmParameters {
        GbmParameters::new(100.0, 0.05, 0.2, 1.0, 10).unwrap()
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            GbmParameters::new(0.0, 0.05, 0.2, 1.0, 10),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            GbmParameters::new(100.0, 0.05, -0.1, 1.0, 10),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            GbmParameters::new(100.0, 0.05, 0.2, 0.0, 10),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            GbmParameters::new(100.0, 0.05, 0.2, 1.0, 0),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            GbmParameters::new(100.0, f64::NAN, 0.2, 1.0, 10),
            Err(RiskError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_simulate_path_rejects_unvalidated_params() {
        let bad = GbmParameters {
            s0: 100.0,
            mu: 0.05,
            sigma: -0.1,
            horizon: 1.0,
            n_steps: 10,
        };
        let mut rng = RandomStream::new(1);
        assert!(simulate_path(&bad, &mut rng).is_err());
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let expected = 100.0 * (0.05_f64 * 2.0).exp();
        for n_steps in [1, 7, 250] {
            let p = GbmParameters::new(100.0, 0.05, 0.0, 2.0, n_steps).unwrap();
            let mut rng = RandomStream::new(99);
            for _ in 0..5 {
                let price = simulate_path(&p, &mut rng).unwrap();
                assert!(
                    ((price - expected) / expected).abs() < 1e-12,
                    "n_steps = {}, price = {}",
                    n_steps,
                    price
                );
            }
        }
    }

    #[test]
    fn test_exact_transition() {
        let p = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 2).unwrap();
        let mut rng = ScriptedNormals {
            draws: vec![1.0, -0.5],
            next: 0,
        };
        let dt = 0.5_f64;
        let drift = (0.05 - 0.5 * 0.04) * dt;
        let diffusion = 0.2 * dt.sqrt();
        let expected = 100.0 * (drift + diffusion).exp() * (drift - 0.5 * diffusion).exp();
        let price = simulate_path(&p, &mut rng).unwrap();
        assert!((price - expected).abs() < 1e-10);
        assert_eq!(rng.next, 2);
    }

    #[test]
    fn test_identical_seeds_identical_paths() {
        let simulator = GbmPathSimulator::new(params()).unwrap();
        let mut a = RandomStream::new(5);
        let mut b = RandomStream::new(5);
        for _ in 0..20 {
            assert_eq!(
                simulator.simulate(&mut a).to_bits(),
                simulator.simulate(&mut b).to_bits()
            );
        }
    }

    #[test]
    fn test_prices_are_non_negative() {
        let p = GbmParameters::new(1.0, -0.5, 2.5, 3.0, 50).unwrap();
        let simulator = GbmPathSimulator::new(p).unwrap();
        let mut rng = RandomStream::new(17);
        for _ in 0..1_000 {
            let price = simulator.simulate(&mut rng);
            assert!(price >= 0.0 && price.is_finite());
        }
    }

    #[test]
    fn test_terminal_mean_matches_lognormal() {
        let simulator = GbmPathSimulator::new(params()).unwrap();
        let mut rng = RandomStream::new(2024);
        let n = 100_000;
        let mean = (0..n).map(|_| simulator.simulate(&mut rng)).sum::<f64>() / n as f64;
        let expected = 100.0 * 0.05_f64.exp();
        assert!((mean - expected).abs() / expected < 0.005, "mean = {}", mean);
    }
}
