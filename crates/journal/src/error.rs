// In crates/journal/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Journal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize journal entry: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed journal line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
