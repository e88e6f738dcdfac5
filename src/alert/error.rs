//! Alert system error types.
//!
//! Errors here are never fatal to the timer: the engine logs them and the
//! session transition proceeds regardless.

use thiserror::Error;

/// Errors that can occur while signaling a completed session.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Audio device is not available (e.g., headless environment).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Failed to create the audio output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// Desktop notification delivery failed.
    #[error("通知の送信に失敗しました: {0}")]
    NotificationFailed(String),
}
