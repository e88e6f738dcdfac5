//! Timer engine for the tomato timer.
//!
//! This module contains the core state machine:
//! - `timer`: mode transitions, countdown/tick semantics, session counting,
//!   long-break cadence, progress computation
//!
//! Collaborators (settings storage, alerting, presentation) are reached only
//! through traits; the engine never touches I/O directly.

pub mod timer;

pub use timer::{EngineError, TimerEngine, TimerEvent};

use tokio::sync::mpsc;

use crate::types::{Mode, TimerState};

/// Observer interface for engine state.
///
/// `on_state_change` fires after every mutation (switch, start, pause,
/// reset, tick, completion, settings application). `on_session_complete`
/// fires once per completed session, before the state-change notification
/// for the newly entered mode.
pub trait TimerObserver: Send {
    /// Called with a snapshot after every state mutation.
    fn on_state_change(&self, state: &TimerState);

    /// Called once per completed session with the mode that finished.
    fn on_session_complete(&self, completed: Mode);
}

// ============================================================================
// ChannelObserver
// ============================================================================

/// Observer that forwards engine events over an unbounded channel.
///
/// Lets async hosts consume engine events (logging, presentation) without
/// holding the engine lock. A dropped receiver is not an error; events are
/// simply discarded.
pub struct ChannelObserver {
    /// Event sender channel
    tx: mpsc::UnboundedSender<TimerEvent>,
}

impl ChannelObserver {
    /// Creates an observer writing to the given sender.
    pub fn new(tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { tx }
    }
}

impl TimerObserver for ChannelObserver {
    fn on_state_change(&self, state: &TimerState) {
        let _ = self.tx.send(TimerEvent::StateChanged {
            state: state.clone(),
        });
    }

    fn on_session_complete(&self, completed: Mode) {
        let _ = self.tx.send(TimerEvent::SessionCompleted { completed });
    }
}

// ============================================================================
// MockObserver
// ============================================================================

/// Mock observer for testing.
///
/// Records every notification in arrival order so tests can assert both
/// content and ordering.
#[derive(Debug, Default)]
pub struct MockObserver {
    events: std::sync::Mutex<Vec<TimerEvent>>,
}

impl MockObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<TimerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the most recent state snapshot, if any.
    #[must_use]
    pub fn last_state(&self) -> Option<TimerState> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                TimerEvent::StateChanged { state } => Some(state.clone()),
                TimerEvent::SessionCompleted { .. } => None,
            })
    }

    /// Returns the completed modes in arrival order.
    #[must_use]
    pub fn completions(&self) -> Vec<Mode> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                TimerEvent::SessionCompleted { completed } => Some(*completed),
                TimerEvent::StateChanged { .. } => None,
            })
            .collect()
    }

    /// Returns how many state-change notifications were recorded.
    #[must_use]
    pub fn state_change_count(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| matches!(event, TimerEvent::StateChanged { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl TimerObserver for MockObserver {
    fn on_state_change(&self, state: &TimerState) {
        self.events.lock().unwrap().push(TimerEvent::StateChanged {
            state: state.clone(),
        });
    }

    fn on_session_complete(&self, completed: Mode) {
        self.events
            .lock()
            .unwrap()
            .push(TimerEvent::SessionCompleted { completed });
    }
}

impl TimerObserver for std::sync::Arc<MockObserver> {
    fn on_state_change(&self, state: &TimerState) {
        MockObserver::on_state_change(self, state)
    }

    fn on_session_complete(&self, completed: Mode) {
        MockObserver::on_session_complete(self, completed)
    }
}
