//! Desktop notification delivery for completed sessions.
//!
//! Thin wrapper around notify-rust; the wording depends on which mode just
//! completed, mirroring the timer's work/break rhythm.

use notify_rust::Notification;
use tracing::debug;

use crate::types::Mode;

use super::error::AlertError;

/// Notification title shown for every session-complete alert.
const NOTIFICATION_SUMMARY: &str = "ポモドーロタイマー";

/// Sends desktop notifications for completed sessions.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Raises a session-complete notification.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::NotificationFailed` if the notification cannot
    /// be delivered.
    pub fn notify_session_complete(&self, completed: Mode) -> Result<(), AlertError> {
        let body = Self::body_for(completed);
        debug!("Sending session-complete notification: {}", body);

        Notification::new()
            .summary(NOTIFICATION_SUMMARY)
            .body(body)
            .appname("tomato")
            .show()
            .map_err(|e| AlertError::NotificationFailed(e.to_string()))?;

        Ok(())
    }

    /// Returns the notification wording for the mode that just completed.
    fn body_for(completed: Mode) -> &'static str {
        if completed.is_break() {
            "休憩終了！作業に戻りましょう。"
        } else {
            "休憩の時間です。ゆっくり休みましょう。"
        }
    }
}
