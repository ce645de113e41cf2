use crate::risk::reduction::RiskResult;

/// Hooks called by a risk simulation run. Every method defaults to doing nothing.
pub trait SimulationObserver: Sync {
    /// The run is restricted to one worker while the machine offers `available` threads.
    fn single_worker(&self, _available: usize) {}

    fn run_started(&self, _n_paths: usize, _n_workers: usize) {}

    fn run_finished(&self, _result: &RiskResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}
