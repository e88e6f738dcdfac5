//! Core timer state machine.
//!
//! This module provides the engine that owns all timer state:
//! - Mode transitions (Work → ShortBreak/LongBreak → Work)
//! - Countdown with 1 Hz tick semantics and stale-tick protection
//! - Session counting and the long-break cadence policy
//! - Settings application with validation and persistence
//! - Observer notification and session-complete alerting

use tracing::warn;

use crate::alert::AlertSignaler;
use crate::settings::SettingsStore;
use crate::types::{Mode, SettingsViolation, TimerSettings, TimerState};

use super::TimerObserver;

// ============================================================================
// TimerEvent
// ============================================================================

/// Engine events as forwarded by a `ChannelObserver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The timer state changed
    StateChanged {
        /// Snapshot after the mutation
        state: TimerState,
    },
    /// A session reached zero remaining time
    SessionCompleted {
        /// The mode that just completed
        completed: Mode,
    },
}

// ============================================================================
// EngineError
// ============================================================================

/// Errors surfaced by engine operations.
///
/// No variant is fatal: a rejected operation leaves the engine state
/// untouched.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Operation attempted in a state that forbids it.
    #[error("タイマー実行中は{operation}できません")]
    InvalidTransition {
        /// Human-readable name of the rejected operation
        operation: &'static str,
    },

    /// Candidate settings violate the bounds policy.
    #[error("{}", format_violations(.0))]
    ValidationFailed(Vec<SettingsViolation>),
}

/// Joins violation messages for user-facing display.
fn format_violations(violations: &[SettingsViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("、")
}

// ============================================================================
// TimerEngine
// ============================================================================

/// The timer state machine.
///
/// Owns the single `TimerState` instance and the active `TimerSettings`.
/// All mutation goes through the operations below; collaborators receive
/// snapshots via the observer interface and never mutate engine state.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Active duration settings
    settings: TimerSettings,
    /// Persistence for settings changes
    store: Box<dyn SettingsStore>,
    /// Fired once per completed session
    signaler: Box<dyn AlertSignaler>,
    /// Subscribed observers, notified synchronously
    observers: Vec<Box<dyn TimerObserver>>,
}

impl TimerEngine {
    /// Creates a new engine: idle in Work mode with a full countdown.
    pub fn new(
        settings: TimerSettings,
        store: Box<dyn SettingsStore>,
        signaler: Box<dyn AlertSignaler>,
    ) -> Self {
        Self {
            state: TimerState::new(&settings),
            settings,
            store,
            signaler,
            observers: Vec::new(),
        }
    }

    /// Subscribes an observer to state changes and session completions.
    pub fn subscribe(&mut self, observer: Box<dyn TimerObserver>) {
        self.observers.push(observer);
    }

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Starts (or resumes) the countdown.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the timer is already running.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state.is_running {
            return Err(EngineError::InvalidTransition { operation: "開始" });
        }

        self.state.is_running = true;
        self.notify_state_change();
        Ok(())
    }

    /// Pauses the countdown. Idempotent: pausing an idle timer is a no-op.
    pub fn pause(&mut self) {
        if !self.state.is_running {
            return;
        }

        self.state.is_running = false;
        self.notify_state_change();
    }

    /// Resets the countdown for the current mode.
    ///
    /// Stops the timer and restores the full duration. The completed
    /// session count is unchanged.
    pub fn reset(&mut self) {
        self.state.is_running = false;
        self.state.time_remaining = self.settings.duration_for(self.state.mode);
        self.notify_state_change();
    }

    /// Switches to the given mode and re-derives the countdown.
    ///
    /// Switching to the current mode is allowed and resets the remaining
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` while the timer is running.
    pub fn switch_mode(&mut self, target: Mode) -> Result<(), EngineError> {
        if self.state.is_running {
            return Err(EngineError::InvalidTransition {
                operation: "モード切り替え",
            });
        }

        self.state.mode = target;
        self.state.time_remaining = self.settings.duration_for(target);
        self.notify_state_change();
        Ok(())
    }

    /// Advances the countdown by one second.
    ///
    /// Called by the host's 1 Hz tick task while the timer runs. A stale
    /// tick delivered after pause or completion is a no-op, so a second
    /// tick landing after the countdown reached zero can never complete
    /// the same session twice.
    pub fn tick(&mut self) {
        if !self.state.is_running {
            return;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        self.notify_state_change();

        if self.state.time_remaining == 0 {
            self.complete_session();
        }
    }

    /// Replaces the settings wholesale.
    ///
    /// When idle, the countdown is re-derived from the new duration for the
    /// current mode. When running, the active countdown is left untouched
    /// except for clamping down to the new duration, so the remaining time
    /// never exceeds it. The new settings are persisted; a persistence
    /// failure is logged and does not roll back the in-memory settings.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` with the full violation list if the
    /// candidate violates the bounds policy; settings are then unchanged.
    pub fn apply_settings(&mut self, candidate: TimerSettings) -> Result<(), EngineError> {
        if let Err(violations) = candidate.validate() {
            return Err(EngineError::ValidationFailed(violations));
        }

        self.settings = candidate;

        if self.state.is_running {
            let duration = self.settings.duration_for(self.state.mode);
            if self.state.time_remaining > duration {
                self.state.time_remaining = duration;
            }
            self.notify_state_change();
        } else {
            self.reset();
        }

        if let Err(e) = self.store.save(&self.settings) {
            warn!("設定の保存に失敗しました: {}", e);
        }

        Ok(())
    }

    /// Returns the elapsed fraction of the current mode, in [0, 1].
    pub fn progress_fraction(&self) -> f64 {
        let duration = self.settings.duration_for(self.state.mode);
        if duration == 0 {
            return 1.0;
        }
        f64::from(duration.saturating_sub(self.state.time_remaining)) / f64::from(duration)
    }

    /// Handles a countdown reaching zero.
    ///
    /// Halts the timer, fires the alert, applies the cadence policy to pick
    /// the next mode, and notifies observers: the session-complete event
    /// first, then the state change for the new mode.
    fn complete_session(&mut self) {
        // The running flag drops before any side effect so a racing tick
        // observes a halted timer.
        self.state.is_running = false;
        let completed = self.state.mode;

        if let Err(e) = self.signaler.signal(completed) {
            warn!("セッション完了アラートに失敗しました: {}", e);
        }

        let next = if completed == Mode::Work {
            self.state.completed_work_sessions += 1;
            if self.state.completed_work_sessions % self.settings.sessions_before_long_break == 0 {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            }
        } else {
            Mode::Work
        };

        self.notify_session_complete(completed);

        self.state.mode = next;
        self.state.time_remaining = self.settings.duration_for(next);
        self.notify_state_change();
    }

    /// Notifies all observers of the current state.
    fn notify_state_change(&self) {
        for observer in &self.observers {
            observer.on_state_change(&self.state);
        }
    }

    /// Notifies all observers of a completed session.
    fn notify_session_complete(&self, completed: Mode) {
        for observer in &self.observers {
            observer.on_session_complete(completed);
        }
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::alert::MockAlertSignaler;
    use crate::engine::MockObserver;
    use crate::settings::MockSettingsStore;

    // ------------------------------------------------------------------------
    // Helper functions
    // ------------------------------------------------------------------------

    struct TestHarness {
        engine: TimerEngine,
        observer: Arc<MockObserver>,
        signaler: Arc<MockAlertSignaler>,
        store: Arc<MockSettingsStore>,
    }

    fn create_harness_with_settings(settings: TimerSettings) -> TestHarness {
        let observer = Arc::new(MockObserver::new());
        let signaler = Arc::new(MockAlertSignaler::new());
        let store = Arc::new(MockSettingsStore::new());

        let mut engine = TimerEngine::new(
            settings,
            Box::new(store.clone()),
            Box::new(signaler.clone()),
        );
        engine.subscribe(Box::new(observer.clone()));

        TestHarness {
            engine,
            observer,
            signaler,
            store,
        }
    }

    fn create_harness() -> TestHarness {
        create_harness_with_settings(TimerSettings::default())
    }

    /// Small durations so completion tests stay readable.
    fn fast_settings() -> TimerSettings {
        TimerSettings {
            work_seconds: 3,
            short_break_seconds: 2,
            long_break_seconds: 5,
            sessions_before_long_break: 4,
        }
    }

    /// Runs one full session to completion from idle.
    fn complete_one_session(engine: &mut TimerEngine) {
        engine.start().unwrap();
        let remaining = engine.state().time_remaining;
        for _ in 0..remaining {
            engine.tick();
        }
        assert!(!engine.state().is_running);
    }

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_engine_initial_state() {
            let harness = create_harness();
            let state = harness.engine.state();

            assert_eq!(state.mode, Mode::Work);
            assert_eq!(state.time_remaining, 1500);
            assert!(!state.is_running);
            assert_eq!(state.completed_work_sessions, 0);
        }

        #[test]
        fn test_new_engine_uses_given_settings() {
            let harness = create_harness_with_settings(
                TimerSettings::default().with_work_minutes(50),
            );
            assert_eq!(harness.engine.state().time_remaining, 50 * 60);
        }
    }

    // ------------------------------------------------------------------------
    // Start / Pause Tests
    // ------------------------------------------------------------------------

    mod start_pause_tests {
        use super::*;

        #[test]
        fn test_start() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();

            assert!(harness.engine.state().is_running);
            assert!(harness.observer.last_state().unwrap().is_running);
        }

        #[test]
        fn test_start_while_running_is_rejected() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            let result = harness.engine.start();

            assert_eq!(
                result,
                Err(EngineError::InvalidTransition { operation: "開始" })
            );
            // State is untouched by the rejection
            assert!(harness.engine.state().is_running);
        }

        #[test]
        fn test_pause() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.pause();

            assert!(!harness.engine.state().is_running);
        }

        #[test]
        fn test_pause_is_idempotent() {
            let mut harness = create_harness();

            harness.engine.pause();
            harness.engine.pause();

            assert!(!harness.engine.state().is_running);
            // No-op pauses emit no notifications
            assert_eq!(harness.observer.state_change_count(), 0);
        }

        #[test]
        fn test_pause_preserves_remaining_time() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            harness.engine.tick();
            harness.engine.pause();

            assert_eq!(harness.engine.state().time_remaining, 1498);
        }

        #[test]
        fn test_start_resumes_after_pause() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            harness.engine.pause();
            harness.engine.start().unwrap();

            assert!(harness.engine.state().is_running);
            assert_eq!(harness.engine.state().time_remaining, 1499);
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_decrements() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();

            assert_eq!(harness.engine.state().time_remaining, 1499);
        }

        #[test]
        fn test_tick_when_idle_is_noop() {
            let mut harness = create_harness();

            harness.engine.tick();

            assert_eq!(harness.engine.state().time_remaining, 1500);
            assert_eq!(harness.observer.state_change_count(), 0);
        }

        #[test]
        fn test_stale_ticks_after_pause_never_decrement() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            harness.engine.pause();

            for _ in 0..10 {
                harness.engine.tick();
            }

            assert_eq!(harness.engine.state().time_remaining, 1499);
        }

        #[test]
        fn test_countdown_completes_exactly_once() {
            let mut harness = create_harness_with_settings(fast_settings());

            harness.engine.start().unwrap();
            for _ in 0..3 {
                harness.engine.tick();
            }

            assert_eq!(harness.observer.completions(), vec![Mode::Work]);
            assert_eq!(harness.signaler.signal_count(), 1);
        }

        #[test]
        fn test_stale_tick_after_completion_is_noop() {
            let mut harness = create_harness_with_settings(fast_settings());

            harness.engine.start().unwrap();
            for _ in 0..3 {
                harness.engine.tick();
            }
            // A late tick delivered after the completion already fired
            harness.engine.tick();

            assert_eq!(harness.observer.completions(), vec![Mode::Work]);
            assert_eq!(harness.engine.state().time_remaining, 2);
        }

        #[test]
        fn test_full_work_countdown_scenario() {
            // workDuration=1500: 1499 ticks leave one second, the next
            // tick completes the session into a short break.
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            for _ in 0..1499 {
                harness.engine.tick();
            }

            let state = harness.engine.state();
            assert_eq!(state.time_remaining, 1);
            assert!(state.is_running);
            assert_eq!(state.completed_work_sessions, 0);

            harness.engine.tick();

            let state = harness.engine.state();
            assert_eq!(state.mode, Mode::ShortBreak);
            assert!(!state.is_running);
            assert_eq!(state.completed_work_sessions, 1);
        }
    }

    // ------------------------------------------------------------------------
    // Switch / Reset Tests
    // ------------------------------------------------------------------------

    mod switch_reset_tests {
        use super::*;

        #[test]
        fn test_switch_mode_sets_exact_duration() {
            let mut harness = create_harness();

            for (mode, expected) in [
                (Mode::ShortBreak, 300),
                (Mode::LongBreak, 900),
                (Mode::Work, 1500),
            ] {
                harness.engine.switch_mode(mode).unwrap();
                assert_eq!(harness.engine.state().mode, mode);
                assert_eq!(harness.engine.state().time_remaining, expected);
            }
        }

        #[test]
        fn test_switch_mode_while_running_is_rejected() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            let result = harness.engine.switch_mode(Mode::LongBreak);

            assert!(matches!(
                result,
                Err(EngineError::InvalidTransition { .. })
            ));
            assert_eq!(harness.engine.state().mode, Mode::Work);
            assert_eq!(harness.engine.state().time_remaining, 1499);
        }

        #[test]
        fn test_switch_to_current_mode_resets_remaining() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            harness.engine.pause();
            harness.engine.switch_mode(Mode::Work).unwrap();

            assert_eq!(harness.engine.state().time_remaining, 1500);
        }

        #[test]
        fn test_reset_restores_duration_and_stops() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            harness.engine.tick();
            harness.engine.reset();

            let state = harness.engine.state();
            assert!(!state.is_running);
            assert_eq!(state.time_remaining, 1500);
        }

        #[test]
        fn test_reset_preserves_completed_sessions() {
            let mut harness = create_harness_with_settings(fast_settings());

            complete_one_session(&mut harness.engine);
            assert_eq!(harness.engine.state().completed_work_sessions, 1);

            harness.engine.reset();
            assert_eq!(harness.engine.state().completed_work_sessions, 1);
        }
    }

    // ------------------------------------------------------------------------
    // Session Completion / Cadence Tests
    // ------------------------------------------------------------------------

    mod completion_tests {
        use super::*;

        #[test]
        fn test_work_completion_increments_sessions() {
            let mut harness = create_harness_with_settings(fast_settings());

            complete_one_session(&mut harness.engine);

            assert_eq!(harness.engine.state().completed_work_sessions, 1);
        }

        #[test]
        fn test_break_completion_returns_to_work() {
            let mut harness = create_harness_with_settings(fast_settings());

            complete_one_session(&mut harness.engine); // work -> short break
            assert_eq!(harness.engine.state().mode, Mode::ShortBreak);

            complete_one_session(&mut harness.engine); // short break -> work

            let state = harness.engine.state();
            assert_eq!(state.mode, Mode::Work);
            // Break completion never counts as a work session
            assert_eq!(state.completed_work_sessions, 1);
        }

        #[test]
        fn test_long_break_cadence_every_fourth_session() {
            let mut harness = create_harness_with_settings(fast_settings());

            // Sessions 1-3 are followed by a short break, session 4 by a
            // long break.
            for expected_session in 1..=4u32 {
                complete_one_session(&mut harness.engine); // work session

                let state = harness.engine.state();
                assert_eq!(state.completed_work_sessions, expected_session);
                if expected_session % 4 == 0 {
                    assert_eq!(state.mode, Mode::LongBreak);
                } else {
                    assert_eq!(state.mode, Mode::ShortBreak);
                }

                complete_one_session(&mut harness.engine); // back to work
                assert_eq!(harness.engine.state().mode, Mode::Work);
            }
        }

        #[test]
        fn test_cadence_table_for_eight_sessions() {
            let settings = TimerSettings {
                sessions_before_long_break: 3,
                ..fast_settings()
            };
            let mut harness = create_harness_with_settings(settings);

            for session in 1..=8u32 {
                complete_one_session(&mut harness.engine);

                let expected = if session % 3 == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                };
                assert_eq!(
                    harness.engine.state().mode,
                    expected,
                    "wrong break after session {}",
                    session
                );

                complete_one_session(&mut harness.engine);
            }
        }

        #[test]
        fn test_cadence_of_one_always_long_breaks() {
            let settings = TimerSettings {
                sessions_before_long_break: 1,
                ..fast_settings()
            };
            let mut harness = create_harness_with_settings(settings);

            complete_one_session(&mut harness.engine);
            assert_eq!(harness.engine.state().mode, Mode::LongBreak);

            complete_one_session(&mut harness.engine);
            complete_one_session(&mut harness.engine);
            assert_eq!(harness.engine.state().mode, Mode::LongBreak);
        }

        #[test]
        fn test_completed_sessions_monotonic() {
            let mut harness = create_harness_with_settings(fast_settings());
            let mut last_count = 0;

            for _ in 0..6 {
                complete_one_session(&mut harness.engine);
                harness.engine.reset();
                let _ = harness.engine.switch_mode(Mode::Work);

                let count = harness.engine.state().completed_work_sessions;
                assert!(count >= last_count);
                last_count = count;
            }
        }

        #[test]
        fn test_signaler_receives_completed_mode() {
            let mut harness = create_harness_with_settings(fast_settings());

            complete_one_session(&mut harness.engine); // work
            complete_one_session(&mut harness.engine); // short break

            assert_eq!(
                harness.signaler.get_signals(),
                vec![Mode::Work, Mode::ShortBreak]
            );
        }

        #[test]
        fn test_signaler_failure_does_not_block_transition() {
            let mut harness = create_harness_with_settings(fast_settings());
            harness.signaler.set_should_fail(true);

            complete_one_session(&mut harness.engine);

            let state = harness.engine.state();
            assert_eq!(state.mode, Mode::ShortBreak);
            assert_eq!(state.completed_work_sessions, 1);
        }

        #[test]
        fn test_session_complete_event_precedes_new_mode_state() {
            let mut harness = create_harness_with_settings(fast_settings());

            complete_one_session(&mut harness.engine);

            let events = harness.observer.events();
            let complete_pos = events
                .iter()
                .position(|e| matches!(e, TimerEvent::SessionCompleted { .. }))
                .unwrap();

            assert_eq!(
                events[complete_pos],
                TimerEvent::SessionCompleted {
                    completed: Mode::Work
                }
            );
            match &events[complete_pos + 1] {
                TimerEvent::StateChanged { state } => {
                    assert_eq!(state.mode, Mode::ShortBreak);
                    assert!(!state.is_running);
                }
                other => panic!("Expected StateChanged after completion, got {:?}", other),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Settings Application Tests
    // ------------------------------------------------------------------------

    mod apply_settings_tests {
        use super::*;

        #[test]
        fn test_apply_settings_idle_rederives_countdown() {
            let mut harness = create_harness();

            let new_settings = TimerSettings::default().with_work_minutes(50);
            harness.engine.apply_settings(new_settings).unwrap();

            let state = harness.engine.state();
            assert_eq!(state.time_remaining, 50 * 60);
            assert!(!state.is_running);
        }

        #[test]
        fn test_apply_settings_persists() {
            let mut harness = create_harness();

            let new_settings = TimerSettings::default().with_work_minutes(30);
            harness.engine.apply_settings(new_settings.clone()).unwrap();

            assert_eq!(harness.store.saved_count(), 1);
            assert_eq!(harness.store.last_saved(), Some(new_settings));
        }

        #[test]
        fn test_apply_settings_rejects_out_of_bounds_work() {
            let mut harness = create_harness();

            let candidate = TimerSettings::default().with_work_minutes(61);
            let result = harness.engine.apply_settings(candidate);

            match result {
                Err(EngineError::ValidationFailed(violations)) => {
                    assert_eq!(violations.len(), 1);
                    assert_eq!(violations[0].field(), "work_duration");
                }
                other => panic!("Expected ValidationFailed, got {:?}", other),
            }

            // Settings and countdown unchanged, nothing persisted
            assert_eq!(harness.engine.settings().work_seconds, 1500);
            assert_eq!(harness.engine.state().time_remaining, 1500);
            assert_eq!(harness.store.saved_count(), 0);
        }

        #[test]
        fn test_apply_settings_while_running_keeps_countdown() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();

            let new_settings = TimerSettings::default().with_work_minutes(50);
            harness.engine.apply_settings(new_settings).unwrap();

            let state = harness.engine.state();
            assert!(state.is_running);
            assert_eq!(state.time_remaining, 1499);
        }

        #[test]
        fn test_apply_settings_while_running_clamps_to_shorter_duration() {
            let mut harness = create_harness();

            harness.engine.start().unwrap();
            harness.engine.tick();
            assert_eq!(harness.engine.state().time_remaining, 1499);

            let new_settings = TimerSettings::default().with_work_minutes(10);
            harness.engine.apply_settings(new_settings).unwrap();

            // Remaining never exceeds the mode duration
            assert_eq!(harness.engine.state().time_remaining, 600);
        }

        #[test]
        fn test_apply_settings_future_modes_use_new_durations() {
            let mut harness = create_harness_with_settings(fast_settings());

            harness.engine.start().unwrap();
            harness
                .engine
                .apply_settings(TimerSettings::default().with_short_break_minutes(7))
                .unwrap();

            // The running 3-second countdown is untouched; the break it
            // transitions into uses the new duration.
            for _ in 0..3 {
                harness.engine.tick();
            }

            let state = harness.engine.state();
            assert_eq!(state.mode, Mode::ShortBreak);
            assert_eq!(state.time_remaining, 7 * 60);
        }

        #[test]
        fn test_apply_settings_save_failure_keeps_in_memory_settings() {
            let mut harness = create_harness();
            harness.store.set_should_fail_save(true);

            let new_settings = TimerSettings::default().with_work_minutes(40);
            harness.engine.apply_settings(new_settings.clone()).unwrap();

            assert_eq!(harness.engine.settings(), &new_settings);
        }
    }

    // ------------------------------------------------------------------------
    // Progress Tests
    // ------------------------------------------------------------------------

    mod progress_tests {
        use super::*;

        #[test]
        fn test_progress_fresh_is_zero() {
            let harness = create_harness();
            assert_eq!(harness.engine.progress_fraction(), 0.0);
        }

        #[test]
        fn test_progress_halfway() {
            let settings = TimerSettings {
                work_seconds: 100,
                ..fast_settings()
            };
            let mut harness = create_harness_with_settings(settings);

            harness.engine.start().unwrap();
            for _ in 0..50 {
                harness.engine.tick();
            }

            assert!((harness.engine.progress_fraction() - 0.5).abs() < f64::EPSILON);
        }

        #[test]
        fn test_progress_stays_in_unit_interval() {
            let mut harness = create_harness_with_settings(fast_settings());

            harness.engine.start().unwrap();
            for _ in 0..10 {
                let progress = harness.engine.progress_fraction();
                assert!((0.0..=1.0).contains(&progress));
                harness.engine.tick();
            }
        }
    }
}
