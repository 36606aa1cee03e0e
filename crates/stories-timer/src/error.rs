//! Tick driver error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("Tick interval must be positive")]
    ZeroInterval,
}
