use std::ops::Range;

use rayon::{
    iter::{IntoParallelIterator, ParallelIterator},
    ThreadPool, ThreadPoolBuilder,
};
use tracing::debug;

use crate::models::gbm::{GbmParameters, GbmPathSimulator};
use crate::models::randomnumbers::RandomStream;
use crate::risk::reduction::{reduce, validate_confidence, RiskResult};
use crate::simulation::observer::{NoopObserver, SimulationObserver};
use crate::simulation::partition::PathPartition;
use crate::utils::errors::{Result, RiskError};

/// Hardware parallelism reported by the OS, at least one.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// OS threads backing a run of `workers` logical workers.
///
/// Streams and blocks are tied to logical workers, not threads, so the cap never
/// changes the output.
pub fn pool_threads(workers: usize, n_paths: usize) -> usize {
    workers.min(available_workers()).min(n_paths).max(1)
}

/// One worker's share of a run: its block of indices, the matching output slots
/// and the random stream it owns for the whole run.
struct WorkerTask<'a> {
    worker: usize,
    indices: Range<usize>,
    slots: &'a mut [f64],
    stream: RandomStream,
}

impl<'a> WorkerTask<'a> {
    fn execute<F>(mut self, path_fn: &F)
    where
        F: Fn(usize, &mut RandomStream) -> f64,
    {
        for (slot, index) in self.slots.iter_mut().zip(self.indices.clone()) {
            *slot = path_fn(index, &mut self.stream);
        }
        debug!(
            worker = self.worker,
            paths = self.indices.len(),
            "worker finished"
        );
    }
}

/// Fills `buffer` by calling `path_fn` once per index, each worker block driven by
/// its own stream seeded `seed + worker`.
///
/// Without a pool the blocks run one after the other on the calling thread. With a
/// pool they run as parallel tasks and the call returns once every block is done.
pub fn fill_terminal_prices<F>(
    buffer: &mut [f64],
    partition: &PathPartition,
    seed: u64,
    pool: Option<&ThreadPool>,
    path_fn: F,
) where
    F: Fn(usize, &mut RandomStream) -> f64 + Sync,
{
    let tasks: Vec<WorkerTask> = partition
        .split_mut(buffer)
        .into_iter()
        .zip(partition.blocks().iter().cloned())
        .enumerate()
        .map(|(worker, (slots, indices))| WorkerTask {
            worker,
            indices,
            slots,
            stream: RandomStream::for_worker(seed, worker),
        })
        .collect();

    match pool {
        Some(pool) => pool.install(|| {
            tasks
                .into_par_iter()
                .for_each(|task| task.execute(&path_fn))
        }),
        None => tasks.into_iter().for_each(|task| task.execute(&path_fn)),
    }
}

/// Monte Carlo estimate of VaR and ES for a GBM terminal price.
///
/// Results are reproducible for a fixed worker count. Changing the worker count
/// changes which stream serves which path, so estimates move within Monte Carlo noise.
#[derive(Debug, Clone, Copy)]
pub struct RiskSimulation {
    params: GbmParameters,
    n_paths: usize,
    confidence: f64,
    seed: u64,
    workers: Option<usize>,
}

impl RiskSimulation {
    pub fn new(params: GbmParameters, n_paths: usize, confidence: f64, seed: u64) -> Self {
        Self {
            params,
            n_paths,
            confidence,
            seed,
            workers: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn params(&self) -> &GbmParameters {
        &self.params
    }

    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Worker count for the run, the available parallelism when none was set.
    pub fn n_workers(&self) -> usize {
        self.workers.unwrap_or_else(available_workers)
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if self.n_paths < 1 {
            return Err(RiskError::InvalidParameter(
                "at least one path is required".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(RiskError::InvalidParameter(
                "at least one worker is required".to_string(),
            ));
        }
        validate_confidence(self.confidence)
    }

    /// Simulates every path and returns the terminal prices in path order.
    pub fn simulate_terminal_prices(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let simulator = GbmPathSimulator::new(self.params)?;
        let workers = self.n_workers();
        let partition = PathPartition::contiguous(self.n_paths, workers);

        let threads = pool_threads(workers, self.n_paths);
        let pool = if threads > 1 {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("mcrisk-worker-{}", i))
                    .build()?,
            )
        } else {
            None
        };

        let mut prices = vec![0.0; self.n_paths];
        fill_terminal_prices(&mut prices, &partition, self.seed, pool.as_ref(), |_, stream| {
            simulator.simulate(stream)
        });
        Ok(prices)
    }

    pub fn run(&self) -> Result<RiskResult> {
        self.run_with_observer(&NoopObserver)
    }

    pub fn run_with_observer(&self, observer: &dyn SimulationObserver) -> Result<RiskResult> {
        self.validate()?;
        let workers = self.n_workers();
        let available = available_workers();
        if workers == 1 && available > 1 {
            observer.single_worker(available);
        }
        observer.run_started(self.n_paths, workers);
        debug!(
            n_paths = self.n_paths,
            n_steps = self.params.n_steps,
            workers,
            seed = self.seed,
            "starting risk simulation"
        );

        let mut prices = self.simulate_terminal_prices()?;
        let result = reduce(&mut prices, self.params.s0, self.confidence)?;

        debug!(
            var = result.var(),
            es = result.es(),
            tail = result.tail_count(),
            "risk simulation finished"
        );
        observer.run_finished(&result);
        Ok(result)
    }
}

/// Runs a full simulation from plain values.
#[allow(clippy::too_many_arguments)]
pub fn run_risk_simulation(
    n_paths: usize,
    n_steps: usize,
    s0: f64,
    mu: f64,
    sigma: f64,
    horizon: f64,
    confidence: f64,
    seed: u64,
    workers: usize,
) -> Result<RiskResult> {
    let params = GbmParameters::new(s0, mu, sigma, horizon, n_steps)?;
    RiskSimulation::new(params, n_paths, confidence, seed)
        .with_workers(workers)
        .run()
}
