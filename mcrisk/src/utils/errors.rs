use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// A simulated value overflowed after the run started; the inputs themselves were valid.
    #[error("Non-finite simulation output: {0}")]
    NonFiniteOutput(String),
    #[error("Could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, RiskError>;
