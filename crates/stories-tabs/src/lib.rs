//! Stories Tab Sequence
//!
//! An ordered run of timed items shown one at a time.
//! Each item fills its progress bar, then the sequence moves on by itself;
//! taps step forward and back, and every selection change restarts the clock.

mod content;
mod error;
mod event;
mod index;
mod model;

pub use content::{ProgressTabContent, Story};
pub use error::TabError;
pub use event::{TabEvent, Transition};
pub use index::SequenceIndex;
pub use model::{TabSequenceModel, TickOutcome, DEFAULT_TICK_INTERVAL};

pub type Result<T> = std::result::Result<T, TabError>;
