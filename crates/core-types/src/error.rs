// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown trade side: '{0}' (expected 'long' or 'short')")]
    UnknownSide(String),
}

pub type Result<T> = std::result::Result<T, Error>;
