//! Stories Core
//!
//! Glue between the presentation layer and the tab sequence.
//! The view forwards lifecycle and gesture events here; the presenter owns
//! the model and the tick driver and decides when time passes.

mod config;
mod error;
mod presenter;
mod state;

pub use config::Config;
pub use error::CoreError;
pub use presenter::StoryPresenter;
pub use state::PlaybackState;

// Re-export the building blocks
pub use stories_tabs::{
    ProgressTabContent, SequenceIndex, Story, TabError, TabEvent, TabSequenceModel, TickOutcome,
    Transition, DEFAULT_TICK_INTERVAL,
};
pub use stories_timer::{TickDriver, TimerError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
