//! Story presenter
//!
//! Owns one tab sequence and the driver that ticks it. The view calls the
//! lifecycle and gesture hooks; everything runs on one local task set, so the
//! model sits in a `RefCell` rather than behind a lock.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use stories_tabs::{ProgressTabContent, TabEvent, TabSequenceModel};
use stories_timer::TickDriver;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::state::PlaybackState;
use crate::Result;

pub struct StoryPresenter<T: ProgressTabContent + 'static> {
    model: Rc<RefCell<TabSequenceModel<T>>>,
    driver: TickDriver,
    state: PlaybackState,
    /// Between `on_appear` and `on_disappear`
    visible: bool,
}

impl<T: ProgressTabContent + 'static> StoryPresenter<T> {
    pub fn new(items: Vec<T>) -> Result<Self> {
        Ok(Self::from_model(TabSequenceModel::new(items)?))
    }

    pub fn with_tick_interval(items: Vec<T>, tick_interval: Duration) -> Result<Self> {
        Ok(Self::from_model(TabSequenceModel::with_tick_interval(
            items,
            tick_interval,
        )?))
    }

    pub fn from_config(items: Vec<T>, config: &Config) -> Result<Self> {
        Self::with_tick_interval(items, config.tick_interval()?)
    }

    pub fn from_model(model: TabSequenceModel<T>) -> Self {
        let state = if model.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        };

        Self {
            model: Rc::new(RefCell::new(model)),
            driver: TickDriver::new(),
            state,
            visible: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Read-only access to the model for rendering
    pub fn with_model<R>(&self, f: impl FnOnce(&TabSequenceModel<T>) -> R) -> R {
        f(&*self.model.borrow())
    }

    pub fn progress(&self, item: &T) -> Duration {
        self.model.borrow().progress(item)
    }

    pub fn progress_fraction(&self, item: &T) -> f64 {
        self.model.borrow().progress_fraction(item)
    }

    pub fn selected_id(&self) -> Option<T::Id> {
        self.model.borrow().selected_id().cloned()
    }

    pub fn elapsed(&self) -> Duration {
        self.model.borrow().elapsed()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TabEvent<T::Id>> {
        self.model.borrow().subscribe()
    }

    /// Whether ticks are currently being delivered
    pub fn is_playing(&self) -> bool {
        self.state.is_ticking()
    }

    /// View became visible: start ticking
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio `LocalSet`, since the tick driver
    /// spawns a local task.
    pub fn on_appear(&mut self) -> Result<()> {
        self.visible = true;
        tracing::info!(state = %self.state, "Story view appeared");
        self.play()
    }

    /// View went away: stop ticking
    pub fn on_disappear(&mut self) {
        self.visible = false;
        tracing::info!(state = %self.state, "Story view disappeared");
        self.pause();
    }

    /// Finger down: hold the current item
    pub fn on_press_begin(&mut self) {
        self.pause();
    }

    /// Finger up: carry on from the same elapsed time
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio `LocalSet` while visible.
    pub fn on_press_end(&mut self) -> Result<()> {
        if !self.visible {
            tracing::debug!("Ignoring press end while not visible");
            return Ok(());
        }
        self.play()
    }

    /// Left half tap
    pub fn tap_previous(&mut self) {
        self.model.borrow_mut().retreat();
    }

    /// Right half tap
    pub fn tap_next(&mut self) {
        self.model.borrow_mut().advance();
    }

    /// Selection driven from outside the gestures, e.g. a swipe
    pub fn select(&mut self, id: &T::Id) {
        self.model.borrow_mut().select(id);
    }

    pub fn reset(&mut self) {
        self.model.borrow_mut().reset();
    }

    fn play(&mut self) -> Result<()> {
        if self.state == PlaybackState::Idle {
            return Ok(());
        }

        let interval = self.model.borrow().tick_interval();
        let model = Rc::downgrade(&self.model);
        self.driver.start(interval, move || tick_model(&model))?;

        self.transition_to(PlaybackState::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        self.driver.stop();
        if self.state != PlaybackState::Idle {
            self.transition_to(PlaybackState::Paused);
        }
    }

    fn transition_to(&mut self, new_state: PlaybackState) {
        if !self.state.can_transition_to(new_state) {
            tracing::warn!(from = %self.state, to = %new_state, "Invalid playback transition");
            return;
        }

        if self.state != new_state {
            tracing::debug!(from = %self.state, to = %new_state, "Playback state transition");
            self.state = new_state;
        }
    }
}

fn tick_model<T: ProgressTabContent>(model: &Weak<RefCell<TabSequenceModel<T>>>) {
    let Some(model) = model.upgrade() else {
        return;
    };

    let borrowed = model.try_borrow_mut();
    match borrowed {
        Ok(mut model) => {
            model.tick();
        }
        Err(_) => tracing::warn!("Tab sequence busy, skipping tick"),
    }
}

impl<T: ProgressTabContent + 'static> std::fmt::Debug for StoryPresenter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryPresenter")
            .field("state", &self.state)
            .field("playing", &self.is_playing())
            .field("visible", &self.visible)
            .field("driver", &self.driver)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stories_tabs::{Story, Transition};
    use tokio::task::LocalSet;
    use tokio::time;

    const INTERVAL: Duration = Duration::from_millis(10);

    fn stories(times_ms: &[u64]) -> Vec<Story> {
        times_ms
            .iter()
            .enumerate()
            .map(|(i, ms)| {
                Story::with_id(
                    format!("story-{}", i),
                    format!("Story {}", i),
                    Duration::from_millis(*ms),
                )
            })
            .collect()
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_initial_states() {
        let presenter = StoryPresenter::new(stories(&[1000])).unwrap();
        assert_eq!(presenter.state(), PlaybackState::Paused);
        assert_eq!(presenter.selected_id(), Some("story-0".to_string()));

        let empty: StoryPresenter<Story> = StoryPresenter::new(Vec::new()).unwrap();
        assert_eq!(empty.state(), PlaybackState::Idle);
        assert_eq!(empty.selected_id(), None);
    }

    #[test]
    fn test_from_config() {
        let config = Config::new(0.25);
        let presenter = StoryPresenter::from_config(stories(&[1000]), &config).unwrap();
        assert_eq!(presenter.with_model(|m| m.tick_interval()), ms(250));

        assert!(StoryPresenter::from_config(stories(&[1000]), &Config::new(0.0)).is_err());
        assert!(StoryPresenter::new(stories(&[1000, 0])).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_appear_ticks_and_auto_advances() {
        LocalSet::new()
            .run_until(async {
                let mut presenter =
                    StoryPresenter::with_tick_interval(stories(&[20, 20]), INTERVAL).unwrap();
                let mut events = presenter.subscribe();

                presenter.on_appear().unwrap();
                assert_eq!(presenter.state(), PlaybackState::Playing);

                time::sleep(ms(25)).await;
                assert_eq!(presenter.elapsed(), ms(20));

                // 30ms: elapsed reached 20ms, so this tick advances
                time::sleep(ms(10)).await;
                assert_eq!(presenter.selected_id(), Some("story-1".to_string()));
                assert_eq!(presenter.elapsed(), Duration::ZERO);
                assert_eq!(
                    events.try_recv().unwrap(),
                    TabEvent::SelectionChanged {
                        from: Some("story-0".to_string()),
                        to: "story-1".to_string(),
                        transition: Transition::Animated,
                    }
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_pauses_and_resumes_from_same_elapsed() {
        LocalSet::new()
            .run_until(async {
                let mut presenter =
                    StoryPresenter::with_tick_interval(stories(&[1000]), INTERVAL).unwrap();
                presenter.on_appear().unwrap();

                time::sleep(ms(55)).await;
                assert_eq!(presenter.elapsed(), ms(50));

                presenter.on_press_begin();
                assert_eq!(presenter.state(), PlaybackState::Paused);
                time::sleep(ms(200)).await;
                assert_eq!(presenter.elapsed(), ms(50));

                presenter.on_press_end().unwrap();
                assert_eq!(presenter.state(), PlaybackState::Playing);
                time::sleep(ms(25)).await;
                assert_eq!(presenter.elapsed(), ms(70));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_disappear_stops_and_press_end_stays_paused() {
        LocalSet::new()
            .run_until(async {
                let mut presenter =
                    StoryPresenter::with_tick_interval(stories(&[1000, 1000]), INTERVAL).unwrap();
                presenter.on_appear().unwrap();
                time::sleep(ms(35)).await;

                presenter.on_disappear();
                assert!(!presenter.is_visible());
                assert_eq!(presenter.state(), PlaybackState::Paused);

                presenter.on_press_end().unwrap();
                assert_eq!(presenter.state(), PlaybackState::Paused);

                time::sleep(ms(100)).await;
                assert_eq!(presenter.elapsed(), ms(30));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_taps_keep_playback_state() {
        LocalSet::new()
            .run_until(async {
                let mut presenter =
                    StoryPresenter::with_tick_interval(stories(&[1000, 1000, 1000]), INTERVAL)
                        .unwrap();
                presenter.on_appear().unwrap();
                time::sleep(ms(15)).await;

                presenter.tap_next();
                assert_eq!(presenter.selected_id(), Some("story-1".to_string()));
                assert_eq!(presenter.elapsed(), Duration::ZERO);
                assert_eq!(presenter.state(), PlaybackState::Playing);

                presenter.on_press_begin();
                presenter.tap_previous();
                presenter.tap_previous();
                assert_eq!(presenter.selected_id(), Some("story-0".to_string()));
                assert_eq!(presenter.state(), PlaybackState::Paused);

                presenter.select(&"story-2".to_string());
                let items = presenter.with_model(|m| m.items().to_vec());
                assert_eq!(presenter.progress(&items[0]), ms(1000));
                assert_eq!(presenter.progress_fraction(&items[1]), 1.0);
                assert_eq!(presenter.progress(&items[2]), Duration::ZERO);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_sequence_never_plays() {
        LocalSet::new()
            .run_until(async {
                let mut presenter: StoryPresenter<Story> =
                    StoryPresenter::new(Vec::new()).unwrap();

                presenter.on_appear().unwrap();
                assert_eq!(presenter.state(), PlaybackState::Idle);
                presenter.tap_next();
                presenter.on_press_begin();
                presenter.on_press_end().unwrap();
                assert_eq!(presenter.state(), PlaybackState::Idle);

                time::sleep(ms(50)).await;
                assert_eq!(presenter.selected_id(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_presenter_stops_ticks() {
        LocalSet::new()
            .run_until(async {
                let mut presenter =
                    StoryPresenter::with_tick_interval(stories(&[1000]), INTERVAL).unwrap();
                let mut events = presenter.subscribe();
                presenter.on_appear().unwrap();
                time::sleep(ms(15)).await;

                drop(presenter);
                time::sleep(ms(100)).await;

                assert!(matches!(
                    events.try_recv(),
                    Err(broadcast::error::TryRecvError::Closed)
                ));
            })
            .await;
    }

    #[test]
    fn test_tick_skips_busy_or_dropped_model() {
        let presenter = StoryPresenter::with_tick_interval(stories(&[1000]), INTERVAL).unwrap();
        let weak = Rc::downgrade(&presenter.model);

        tick_model(&weak);
        assert_eq!(presenter.elapsed(), ms(10));

        {
            let _held = presenter.model.borrow_mut();
            tick_model(&weak);
        }
        assert_eq!(presenter.elapsed(), ms(10));

        drop(presenter);
        tick_model(&weak);
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_playing_follows_state() {
        LocalSet::new()
            .run_until(async {
                let mut presenter =
                    StoryPresenter::with_tick_interval(stories(&[1000]), INTERVAL).unwrap();
                assert!(!presenter.is_playing());

                presenter.on_appear().unwrap();
                assert!(presenter.is_playing());
                assert!(format!("{:?}", presenter).contains("playing: true"));

                presenter.on_press_begin();
                assert!(!presenter.is_playing());
            })
            .await;
    }

    #[tokio::test]
    #[should_panic(expected = "spawn_local")]
    async fn test_appear_outside_local_set_panics() {
        let mut presenter = StoryPresenter::with_tick_interval(stories(&[1000]), INTERVAL).unwrap();
        let _ = presenter.on_appear();
    }
}
