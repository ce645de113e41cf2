use std::path::Path;

use mcrisk::prelude::{GbmParameters, RiskSimulation};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Run configuration. Missing keys in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_paths: usize,
    pub n_steps: usize,
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
    pub horizon: f64,
    pub alpha: f64,
    pub seed: u64,
    pub workers: Option<usize>,
    pub warmup: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_paths: 1_000_000,
            n_steps: 252,
            s0: 100.0,
            mu: 0.05,
            sigma: 0.20,
            horizon: 1.0,
            alpha: 0.95,
            seed: 42,
            workers: None,
            warmup: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn params(&self) -> Result<GbmParameters> {
        Ok(GbmParameters::new(
            self.s0,
            self.mu,
            self.sigma,
            self.horizon,
            self.n_steps,
        )?)
    }

    pub fn simulation(&self) -> Result<RiskSimulation> {
        let sim = RiskSimulation::new(self.params()?, self.n_paths, self.alpha, self.seed);
        let sim = match self.workers {
            Some(workers) => sim.with_workers(workers),
            None => sim,
        };
        sim.validate()?;
        Ok(sim)
    }

    /// Small untimed run with the same confidence, seed and workers.
    pub fn warmup_run(&self) -> Self {
        Self {
            n_paths: 100,
            n_steps: 10,
            ..self.clone()
        }
    }
}
