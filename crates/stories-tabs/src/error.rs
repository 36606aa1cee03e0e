//! Tab sequence error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tick interval must be positive, got {0:?}")]
    InvalidTickInterval(Duration),

    #[error("Item {index} ({id}) must have a positive total time")]
    InvalidTotalTime { index: usize, id: String },

    #[error("Duplicate item id: {0}")]
    DuplicateId(String),
}
