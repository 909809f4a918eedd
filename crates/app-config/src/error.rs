// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid risk configuration: {0}")]
    InvalidRisk(#[from] risk::Error),

    #[error("Invalid execution configuration: {0}")]
    InvalidExecution(#[from] execution::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
