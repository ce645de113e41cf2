mod config;
mod errors;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use mcrisk::prelude::*;

use crate::config::SimulationConfig;
use crate::report::RunReport;

#[derive(Debug, Parser)]
#[command(
    name = "mcrisk",
    about = "Parallel Monte Carlo VaR / ES of a GBM terminal price",
    version
)]
struct Args {
    /// JSON file with run settings; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated paths.
    #[arg(long)]
    npaths: Option<usize>,

    /// Time steps per path.
    #[arg(long)]
    nsteps: Option<usize>,

    /// Confidence level in (0, 1).
    #[arg(long)]
    alpha: Option<f64>,

    /// Base seed. Worker w draws from seed + w.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to available parallelism).
    #[arg(long, env = "MCRISK_WORKERS")]
    workers: Option<usize>,

    #[arg(long)]
    s0: Option<f64>,

    #[arg(long)]
    mu: Option<f64>,

    #[arg(long)]
    sigma: Option<f64>,

    /// Horizon in years.
    #[arg(long)]
    horizon: Option<f64>,

    /// Skip the untimed warm-up run.
    #[arg(long)]
    no_warmup: bool,

    /// Print the report as a single JSON object.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn resolve(&self) -> errors::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(v) = self.npaths {
            config.n_paths = v;
        }
        if let Some(v) = self.nsteps {
            config.n_steps = v;
        }
        if let Some(v) = self.alpha {
            config.alpha = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.workers {
            config.workers = Some(v);
        }
        if let Some(v) = self.s0 {
            config.s0 = v;
        }
        if let Some(v) = self.mu {
            config.mu = v;
        }
        if let Some(v) = self.sigma {
            config.sigma = v;
        }
        if let Some(v) = self.horizon {
            config.horizon = v;
        }
        if self.no_warmup {
            config.warmup = false;
        }
        Ok(config)
    }
}

/// Forwards simulation events to the tracing subscriber.
struct TracingObserver;

impl SimulationObserver for TracingObserver {
    fn single_worker(&self, available: usize) {
        tracing::warn!(
            available,
            "running on a single worker; set --workers or MCRISK_WORKERS > 1 for parallel execution"
        );
    }

    fn run_started(&self, n_paths: usize, n_workers: usize) {
        tracing::debug!(n_paths, n_workers, "run started");
    }
}

fn run(args: &Args) -> errors::Result<RunReport> {
    let config = args.resolve()?;
    let sim = config.simulation()?;
    let workers = sim.n_workers();
    tracing::info!(
        n_paths = config.n_paths,
        n_steps = config.n_steps,
        alpha = config.alpha,
        seed = config.seed,
        workers,
        "running multi-threaded Monte Carlo"
    );

    if config.warmup {
        config.warmup_run().simulation()?.run()?;
        tracing::debug!("warm-up finished");
    }

    let start = Instant::now();
    let estimate = sim.run_with_observer(&TracingObserver)?;
    let elapsed = start.elapsed();

    let reference = lognormal_tail_risk(sim.params(), config.alpha)?;
    Ok(RunReport::new(
        config.n_paths,
        config.n_steps,
        workers,
        &estimate,
        &reference,
        elapsed,
    ))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let report = match run(&args) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                tracing::error!("could not serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }
}
