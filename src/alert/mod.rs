//! Session-complete alerting for the tomato timer.
//!
//! This module provides the alert side effects fired once per completed
//! session:
//!
//! - A synthesized two-tone completion chime (rodio)
//! - A desktop notification (notify-rust)
//! - Graceful degradation when audio is unavailable
//!
//! The engine only sees the `AlertSignaler` trait; failures are reported as
//! values and never block the mode transition.

mod error;
mod notify;
mod sound;

pub use error::AlertError;
pub use notify::DesktopNotifier;
pub use sound::{try_create_player, ChimePlayer};

use tracing::{debug, warn};

use crate::types::Mode;

/// Trait for session-complete alert implementations.
///
/// Invoked by the engine exactly once per completed session, between
/// halting the countdown and switching to the next mode. Implementations
/// must not block for long; errors are logged by the caller and ignored.
pub trait AlertSignaler: Send {
    /// Signals that a session in `completed` mode has finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered.
    fn signal(&self, completed: Mode) -> Result<(), AlertError>;
}

// ============================================================================
// DesktopAlertSignaler
// ============================================================================

/// Production signaler: chime plus desktop notification.
///
/// The rodio output stream is not `Send`, so the chime plays on a dedicated
/// worker thread fed through a crossbeam channel; the signaler itself stays
/// freely shareable with the engine.
pub struct DesktopAlertSignaler {
    /// Chime requests to the playback thread; None when audio is disabled.
    chime_tx: Option<crossbeam_channel::Sender<()>>,
    /// Desktop notification sender.
    notifier: DesktopNotifier,
}

impl DesktopAlertSignaler {
    /// Creates a signaler with sound enabled where possible.
    ///
    /// Audio initialization failure is not an error: the signaler degrades
    /// to notification-only and a warning is logged.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chime_tx: spawn_chime_thread(),
            notifier: DesktopNotifier::new(),
        }
    }

    /// Creates a notification-only signaler.
    #[must_use]
    pub fn without_sound() -> Self {
        Self {
            chime_tx: None,
            notifier: DesktopNotifier::new(),
        }
    }

    /// Returns true if a chime playback thread is attached.
    #[must_use]
    pub fn has_sound(&self) -> bool {
        self.chime_tx.is_some()
    }
}

impl Default for DesktopAlertSignaler {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSignaler for DesktopAlertSignaler {
    fn signal(&self, completed: Mode) -> Result<(), AlertError> {
        // Chime failure alone does not fail the alert; the notification is
        // the part the user must not miss.
        if let Some(tx) = &self.chime_tx {
            if tx.send(()).is_err() {
                debug!("チャイムスレッドが停止しているため再生をスキップします");
            }
        }

        self.notifier.notify_session_complete(completed)
    }
}

/// Spawns the chime playback thread.
///
/// The thread owns the audio output stream for its whole lifetime; it exits
/// when the sending side is dropped or when no audio device exists.
fn spawn_chime_thread() -> Option<crossbeam_channel::Sender<()>> {
    let (tx, rx) = crossbeam_channel::unbounded::<()>();

    let spawned = std::thread::Builder::new()
        .name("tomato-chime".to_string())
        .spawn(move || {
            let player = match try_create_player() {
                Some(player) => player,
                None => return,
            };

            while rx.recv().is_ok() {
                if let Err(e) = player.chime() {
                    warn!("チャイムの再生に失敗しました: {}", e);
                }
            }
        });

    match spawned {
        Ok(_handle) => Some(tx),
        Err(e) => {
            warn!("チャイムスレッドの起動に失敗しました: {}", e);
            None
        }
    }
}

// ============================================================================
// MockAlertSignaler
// ============================================================================

/// Mock alert signaler for testing.
#[derive(Debug, Default)]
pub struct MockAlertSignaler {
    signals: std::sync::Mutex<Vec<Mode>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockAlertSignaler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.signals.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_signals(&self) -> Vec<Mode> {
        self.signals.lock().unwrap().clone()
    }

    pub fn clear_signals(&self) {
        self.signals.lock().unwrap().clear();
    }
}

impl AlertSignaler for MockAlertSignaler {
    fn signal(&self, completed: Mode) -> Result<(), AlertError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AlertError::NotificationFailed("Mock failure".to_string()));
        }
        self.signals.lock().unwrap().push(completed);
        Ok(())
    }
}

impl AlertSignaler for std::sync::Arc<MockAlertSignaler> {
    fn signal(&self, completed: Mode) -> Result<(), AlertError> {
        MockAlertSignaler::signal(self, completed)
    }
}
