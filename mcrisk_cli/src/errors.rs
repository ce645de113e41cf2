use mcrisk::utils::errors::RiskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Simulation error: {0}")]
    Risk(#[from] RiskError),
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
