//! Tick driver
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//! ```
//!
//! `stop` while stopped and `start` while running are no-ops.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::TimerError;
use crate::Result;

/// The live half of a running driver
struct Subscription {
    handle: JoinHandle<()>,
    /// Cleared on stop; the task checks it before every callback
    live: Rc<Cell<bool>>,
    interval: Duration,
}

#[derive(Default)]
pub struct TickDriver {
    subscription: Option<Subscription>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }

    /// Cadence of the running subscription
    pub fn interval(&self) -> Option<Duration> {
        self.subscription.as_ref().map(|s| s.interval)
    }

    /// Call `on_tick` every `interval` until stopped.
    ///
    /// The first call happens one full interval after start. Firings missed
    /// while the context was busy are skipped, not replayed. Starting an
    /// already running driver does nothing.
    ///
    /// Must be called from within a tokio `LocalSet`.
    pub fn start<F>(&mut self, interval: Duration, mut on_tick: F) -> Result<()>
    where
        F: FnMut() + 'static,
    {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval);
        }

        if self.subscription.is_some() {
            return Ok(());
        }

        let live = Rc::new(Cell::new(true));
        let task_live = Rc::clone(&live);

        let handle = tokio::task::spawn_local(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if !task_live.get() {
                    break;
                }
                on_tick();
            }
        });

        tracing::debug!(interval = ?interval, "Tick driver started");

        self.subscription = Some(Subscription {
            handle,
            live,
            interval,
        });

        Ok(())
    }

    /// Cancel the running subscription, if any. No tick from it is delivered
    /// after this returns.
    pub fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.live.set(false);
            subscription.handle.abort();
            tracing::debug!("Tick driver stopped");
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for TickDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickDriver")
            .field("running", &self.is_running())
            .field("interval", &self.interval())
            .finish()
    }
}
