use crate::types::MovieId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown item: {0}")]
    UnknownItem(MovieId),

    #[error("Movie not found: {0}")]
    ItemNotFound(MovieId),

    #[error("Invalid dense index: {0}")]
    InvalidIndex(usize),

    #[error("Index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to load artifact: {0}")]
    Load(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
