//! Monte Carlo Value-at-Risk and Expected Shortfall of a GBM terminal price,
//! simulated in parallel with one seeded random stream per worker.
pub mod models;
pub mod prelude;
pub mod risk;
pub mod simulation;
pub mod utils;
