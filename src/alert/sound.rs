//! Completion chime playback using rodio.
//!
//! The chime is synthesized from sine waves instead of shipping an audio
//! asset: two rising two-tone chimes with a short gap between them.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::AlertError;

/// Gain applied to every chime tone.
const CHIME_GAIN: f32 = 0.3;

/// Gap between the first and second chime.
const CHIME_GAP: Duration = Duration::from_millis(200);

/// A chime player backed by a rodio output stream.
///
/// The output stream is not `Send`, so the player must stay on the thread
/// that created it. Playback is non-blocking; the chime continues in the
/// background after `chime` returns.
pub struct ChimePlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl ChimePlayer {
    /// Creates a new chime player.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, AlertError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AlertError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays the completion chime.
    ///
    /// Non-blocking; the tones keep playing after this method returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the playback sink cannot be created.
    pub fn chime(&self) -> Result<(), AlertError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AlertError::StreamError(e.to_string()))?;

        // First chime rises 800 -> 1000 Hz, the second 1000 -> 1200 Hz
        sink.append(tone(800.0, 100));
        sink.append(tone(1000.0, 400));
        sink.append(tone(1000.0, 100).delay(CHIME_GAP));
        sink.append(tone(1200.0, 400));
        sink.detach();

        debug!("Chime playback started (detached)");
        Ok(())
    }
}

impl std::fmt::Debug for ChimePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChimePlayer").finish_non_exhaustive()
    }
}

/// Builds a single fixed-length sine tone.
fn tone(freq: f32, millis: u64) -> impl Source<Item = f32> {
    SineWave::new(freq)
        .take_duration(Duration::from_millis(millis))
        .amplify(CHIME_GAIN)
}

/// Creates a chime player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned
/// so the caller degrades to notification-only alerts.
#[must_use]
pub fn try_create_player() -> Option<ChimePlayer> {
    match ChimePlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("オーディオが利用できないためチャイムを無効化します: {}", e);
            None
        }
    }
}
