//! Stories Tick Driver
//!
//! A repeating timer for the single-threaded UI context.
//! Runs as a local task on the caller's tokio `LocalSet`; stopping it is
//! final for that subscription, and pausing is just stop followed by start.

mod driver;
mod error;

pub use driver::TickDriver;
pub use error::TimerError;

pub type Result<T> = std::result::Result<T, TimerError>;
