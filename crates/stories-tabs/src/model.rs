//! Tab sequence model
//!
//! Progress per item, relative to the selection:
//! ```text
//! before selected   selected    after selected
//! [##########]      [####    ]  [          ]
//! total_time        elapsed     zero
//! ```
//!
//! Each tick adds one interval to `elapsed` until it reaches the selected
//! item's total time; the tick after that advances the selection.

use std::time::Duration;
use tokio::sync::broadcast;

use crate::content::ProgressTabContent;
use crate::error::TabError;
use crate::event::{TabEvent, Transition};
use crate::index::SequenceIndex;
use crate::Result;

/// 100 ticks per second
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

const EVENT_CAPACITY: usize = 64;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Elapsed time grew by one interval
    Progressed,
    /// The selected item had run its course; the selection moved on
    Advanced,
    /// Nothing is selected
    Idle,
}

#[derive(Debug)]
pub struct TabSequenceModel<T: ProgressTabContent> {
    /// Items in display order, fixed for the model's lifetime
    items: Vec<T>,
    /// Identity lookup over `items`
    index: SequenceIndex<T::Id>,
    /// Currently displayed item; `None` only for an empty sequence
    selected: Option<T::Id>,
    /// Time spent on the selected item since it became selected
    elapsed: Duration,
    /// Amount added to `elapsed` per tick
    tick_interval: Duration,
    /// Change notifications for the presentation layer
    events: broadcast::Sender<TabEvent<T::Id>>,
}

impl<T: ProgressTabContent> TabSequenceModel<T> {
    pub fn new(items: Vec<T>) -> Result<Self> {
        Self::with_tick_interval(items, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_tick_interval(items: Vec<T>, tick_interval: Duration) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(TabError::InvalidTickInterval(tick_interval));
        }

        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, item)| item.total_time().is_zero())
        {
            return Err(TabError::InvalidTotalTime {
                index,
                id: format!("{:?}", item.id()),
            });
        }

        let index = SequenceIndex::build(&items)?;
        let selected = items.first().map(ProgressTabContent::id);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::debug!(
            items = items.len(),
            tick_interval = ?tick_interval,
            "Created tab sequence"
        );

        Ok(Self {
            items,
            index,
            selected,
            elapsed: Duration::ZERO,
            tick_interval,
            events,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn selected_id(&self) -> Option<&T::Id> {
        self.selected.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .as_ref()
            .and_then(|id| self.index.position(id))
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_index().and_then(|i| self.items.get(i))
    }

    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.index.position(id)
    }

    /// Listen for selection changes and resets
    pub fn subscribe(&self) -> broadcast::Receiver<TabEvent<T::Id>> {
        self.events.subscribe()
    }

    /// Progress of `item` as a duration:
    /// - the selected item reports the elapsed time
    /// - items before it are complete (their total time)
    /// - items after it, and unknown items, report zero
    pub fn progress(&self, item: &T) -> Duration {
        let (Some(selected_id), Some(selected_index)) =
            (self.selected.as_ref(), self.selected_index())
        else {
            return Duration::ZERO;
        };

        let id = item.id();
        let Some(item_index) = self.index.position(&id) else {
            return Duration::ZERO;
        };

        if &id == selected_id {
            self.elapsed
        } else if item_index < selected_index {
            item.total_time()
        } else {
            Duration::ZERO
        }
    }

    /// Progress as a bar fill in `0.0..=1.0`.
    ///
    /// The last tick before an auto-advance can push `elapsed` past the
    /// total time by up to one interval; the fill is clamped.
    pub fn progress_fraction(&self, item: &T) -> f64 {
        let total = item.total_time();
        if total.is_zero() {
            return 0.0;
        }
        (self.progress(item).as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Select the item with `id`. Unknown ids are ignored, and selecting the
    /// current item keeps its elapsed time.
    pub fn select(&mut self, id: &T::Id) {
        if !self.index.contains(id) {
            tracing::debug!(id = ?id, "Ignoring selection of unknown item");
            return;
        }

        if self.selected.as_ref() == Some(id) {
            return;
        }

        self.move_selection(id.clone(), Transition::Immediate);
    }

    /// Step to the next item, wrapping from the last back to the first
    pub fn advance(&mut self) {
        let Some(current) = self.selected_index() else {
            self.select_first();
            return;
        };

        let next = if current + 1 < self.items.len() {
            current + 1
        } else {
            0
        };

        self.step_to(next, Transition::Animated);
    }

    /// Step to the previous item. The first item stays put and restarts.
    pub fn retreat(&mut self) {
        let Some(current) = self.selected_index() else {
            self.select_first();
            return;
        };

        self.step_to(current.saturating_sub(1), Transition::Immediate);
    }

    /// One timer firing
    pub fn tick(&mut self) -> TickOutcome {
        let Some(total_time) = self.selected_item().map(ProgressTabContent::total_time) else {
            return TickOutcome::Idle;
        };

        if self.elapsed < total_time {
            self.elapsed += self.tick_interval;
            TickOutcome::Progressed
        } else {
            self.advance();
            TickOutcome::Advanced
        }
    }

    /// Clear elapsed time, keeping the selection
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        if let Some(id) = self.selected.clone() {
            self.emit(TabEvent::ProgressReset { id });
        }
    }

    fn select_first(&mut self) {
        if let Some(first) = self.items.first().map(ProgressTabContent::id) {
            self.move_selection(first, Transition::Immediate);
        }
    }

    fn step_to(&mut self, position: usize, transition: Transition) {
        let Some(id) = self.items.get(position).map(ProgressTabContent::id) else {
            return;
        };

        if self.selected.as_ref() == Some(&id) {
            self.elapsed = Duration::ZERO;
            tracing::trace!(id = ?id, "Restarted current item");
            self.emit(TabEvent::Restarted { id });
        } else {
            self.move_selection(id, transition);
        }
    }

    fn move_selection(&mut self, to: T::Id, transition: Transition) {
        let from = self.selected.replace(to.clone());
        self.elapsed = Duration::ZERO;

        tracing::debug!(
            from = ?from,
            to = ?to,
            transition = ?transition,
            "Tab selection changed"
        );

        self.emit(TabEvent::SelectionChanged {
            from,
            to,
            transition,
        });
    }

    fn emit(&self, event: TabEvent<T::Id>) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
