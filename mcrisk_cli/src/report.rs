use std::fmt;
use std::time::Duration;

use mcrisk::prelude::RiskResult;
use serde::Serialize;

/// Outcome of the timed run as printed to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub n_paths: usize,
    pub n_steps: usize,
    pub alpha: f64,
    pub workers: usize,
    pub var: f64,
    pub es: f64,
    pub reference_var: f64,
    pub reference_es: f64,
    pub elapsed_secs: f64,
    pub paths_per_sec: f64,
}

impl RunReport {
    pub fn new(
        n_paths: usize,
        n_steps: usize,
        workers: usize,
        estimate: &RiskResult,
        reference: &RiskResult,
        elapsed: Duration,
    ) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let paths_per_sec = if elapsed_secs > 0.0 {
            n_paths as f64 / elapsed_secs
        } else {
            f64::INFINITY
        };
        Self {
            n_paths,
            n_steps,
            alpha: estimate.confidence(),
            workers,
            var: estimate.var(),
            es: estimate.es(),
            reference_var: reference.var(),
            reference_es: reference.es(),
            elapsed_secs,
            paths_per_sec,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results: VaR = {:.4}, ES = {:.4}", self.var, self.es)?;
        writeln!(
            f,
            "Lognormal reference: VaR = {:.4}, ES = {:.4}",
            self.reference_var, self.reference_es
        )?;
        write!(
            f,
            "Completed in {:.2} seconds ({:.0} paths/sec).",
            self.elapsed_secs, self.paths_per_sec
        )
    }
}
