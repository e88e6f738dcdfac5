//! Core data types for the tomato timer.
//!
//! This module defines the data structures used for:
//! - Timer mode and state management
//! - Duration settings with bounds validation
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};

// ============================================================================
// Mode
// ============================================================================

/// The current phase of the pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Focused work period
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break after the configured number of work sessions
    LongBreak,
}

impl Mode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short_break",
            Mode::LongBreak => "long_break",
        }
    }

    /// Returns true if this mode is a break of either length.
    pub fn is_break(&self) -> bool {
        matches!(self, Mode::ShortBreak | Mode::LongBreak)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Work
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Default work duration in seconds (25 minutes).
fn default_work_seconds() -> u32 {
    25 * 60
}

/// Default short break duration in seconds (5 minutes).
fn default_short_break_seconds() -> u32 {
    5 * 60
}

/// Default long break duration in seconds (15 minutes).
fn default_long_break_seconds() -> u32 {
    15 * 60
}

/// Default number of work sessions before a long break.
fn default_sessions_before_long_break() -> u32 {
    4
}

/// Bounds for the work duration, in minutes.
pub const WORK_MINUTES_BOUNDS: (u32, u32) = (1, 60);

/// Bounds for the short break duration, in minutes.
pub const SHORT_BREAK_MINUTES_BOUNDS: (u32, u32) = (1, 30);

/// Bounds for the long break duration, in minutes.
pub const LONG_BREAK_MINUTES_BOUNDS: (u32, u32) = (1, 60);

/// Bounds for the sessions-before-long-break count.
pub const SESSIONS_BOUNDS: (u32, u32) = (1, 10);

/// Duration settings for the timer.
///
/// Durations are stored in seconds. The serialized field names match the
/// persisted settings blob, which predates this implementation; every field
/// carries a default so a blob with missing fields still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Work duration in seconds
    #[serde(rename = "workDuration", default = "default_work_seconds")]
    pub work_seconds: u32,

    /// Short break duration in seconds
    #[serde(rename = "shortBreakDuration", default = "default_short_break_seconds")]
    pub short_break_seconds: u32,

    /// Long break duration in seconds
    #[serde(rename = "longBreakDuration", default = "default_long_break_seconds")]
    pub long_break_seconds: u32,

    /// Number of completed work sessions that trigger a long break
    #[serde(
        rename = "sessionsBeforeLongBreak",
        default = "default_sessions_before_long_break"
    )]
    pub sessions_before_long_break: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_seconds: default_work_seconds(),
            short_break_seconds: default_short_break_seconds(),
            long_break_seconds: default_long_break_seconds(),
            sessions_before_long_break: default_sessions_before_long_break(),
        }
    }
}

impl TimerSettings {
    /// Creates a new settings value with the specified work duration in minutes.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_seconds = minutes * 60;
        self
    }

    /// Creates a new settings value with the specified short break in minutes.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_seconds = minutes * 60;
        self
    }

    /// Creates a new settings value with the specified long break in minutes.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_seconds = minutes * 60;
        self
    }

    /// Creates a new settings value with the specified long break cadence.
    pub fn with_sessions_before_long_break(mut self, sessions: u32) -> Self {
        self.sessions_before_long_break = sessions;
        self
    }

    /// Returns the configured duration in seconds for the given mode.
    pub fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_seconds,
            Mode::ShortBreak => self.short_break_seconds,
            Mode::LongBreak => self.long_break_seconds,
        }
    }

    /// Checks this settings value against the bounds policy.
    ///
    /// Returns one descriptor per violated constraint. An empty list means
    /// the settings are acceptable.
    pub fn violations(&self) -> Vec<SettingsViolation> {
        let mut violations = Vec::new();

        if !in_minute_bounds(self.work_seconds, WORK_MINUTES_BOUNDS) {
            violations.push(SettingsViolation::WorkDurationOutOfRange {
                seconds: self.work_seconds,
            });
        }
        if !in_minute_bounds(self.short_break_seconds, SHORT_BREAK_MINUTES_BOUNDS) {
            violations.push(SettingsViolation::ShortBreakOutOfRange {
                seconds: self.short_break_seconds,
            });
        }
        if !in_minute_bounds(self.long_break_seconds, LONG_BREAK_MINUTES_BOUNDS) {
            violations.push(SettingsViolation::LongBreakOutOfRange {
                seconds: self.long_break_seconds,
            });
        }
        let (min_sessions, max_sessions) = SESSIONS_BOUNDS;
        if self.sessions_before_long_break < min_sessions
            || self.sessions_before_long_break > max_sessions
        {
            violations.push(SettingsViolation::SessionCountOutOfRange {
                sessions: self.sessions_before_long_break,
            });
        }

        violations
    }

    /// Validates the settings against the bounds policy.
    ///
    /// Returns the full violation list on failure.
    pub fn validate(&self) -> Result<(), Vec<SettingsViolation>> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Returns true if a second-denominated duration falls inside minute bounds.
fn in_minute_bounds(seconds: u32, bounds: (u32, u32)) -> bool {
    let (min_minutes, max_minutes) = bounds;
    seconds >= min_minutes * 60 && seconds <= max_minutes * 60
}

// ============================================================================
// SettingsViolation
// ============================================================================

/// A single violated constraint from the settings bounds policy.
///
/// Each variant names the offending field and carries the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettingsViolation {
    /// Work duration outside 1-60 minutes
    #[error("作業時間は1〜60分の範囲で指定してください")]
    WorkDurationOutOfRange {
        /// Rejected value in seconds
        seconds: u32,
    },

    /// Short break duration outside 1-30 minutes
    #[error("短い休憩は1〜30分の範囲で指定してください")]
    ShortBreakOutOfRange {
        /// Rejected value in seconds
        seconds: u32,
    },

    /// Long break duration outside 1-60 minutes
    #[error("長い休憩は1〜60分の範囲で指定してください")]
    LongBreakOutOfRange {
        /// Rejected value in seconds
        seconds: u32,
    },

    /// Sessions-before-long-break outside 1-10
    #[error("長い休憩までのセッション数は1〜10の範囲で指定してください")]
    SessionCountOutOfRange {
        /// Rejected session count
        sessions: u32,
    },
}

impl SettingsViolation {
    /// Returns the name of the violated settings field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::WorkDurationOutOfRange { .. } => "work_duration",
            Self::ShortBreakOutOfRange { .. } => "short_break_duration",
            Self::LongBreakOutOfRange { .. } => "long_break_duration",
            Self::SessionCountOutOfRange { .. } => "sessions_before_long_break",
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Snapshot of the timer state.
///
/// Owned and mutated exclusively by the engine; collaborators only ever see
/// copies pushed through the observer interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current mode
    pub mode: Mode,
    /// Remaining seconds in the current mode
    #[serde(rename = "timeRemaining")]
    pub time_remaining: u32,
    /// Whether the countdown is running
    #[serde(rename = "isRunning")]
    pub is_running: bool,
    /// Number of work sessions completed since the engine was constructed
    #[serde(rename = "completedWorkSessions")]
    pub completed_work_sessions: u32,
}

impl TimerState {
    /// Creates the initial state for the given settings: idle in Work mode
    /// with a full countdown and no completed sessions.
    pub fn new(settings: &TimerSettings) -> Self {
        Self {
            mode: Mode::Work,
            time_remaining: settings.duration_for(Mode::Work),
            is_running: false,
            completed_work_sessions: 0,
        }
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// Optional overrides for the settings command, in minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsParams {
    /// Work duration in minutes
    #[serde(rename = "workMinutes", skip_serializing_if = "Option::is_none")]
    pub work_minutes: Option<u32>,
    /// Short break duration in minutes
    #[serde(rename = "shortBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub short_break_minutes: Option<u32>,
    /// Long break duration in minutes
    #[serde(rename = "longBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<u32>,
    /// Work sessions before a long break
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<u32>,
}

impl SettingsParams {
    /// Returns true if no override is present.
    pub fn is_empty(&self) -> bool {
        self.work_minutes.is_none()
            && self.short_break_minutes.is_none()
            && self.long_break_minutes.is_none()
            && self.sessions.is_none()
    }

    /// Applies the overrides on top of a base settings value.
    pub fn apply_to(&self, base: &TimerSettings) -> TimerSettings {
        let mut settings = base.clone();
        if let Some(work) = self.work_minutes {
            settings.work_seconds = work * 60;
        }
        if let Some(short_break) = self.short_break_minutes {
            settings.short_break_seconds = short_break * 60;
        }
        if let Some(long_break) = self.long_break_minutes {
            settings.long_break_seconds = long_break * 60;
        }
        if let Some(sessions) = self.sessions {
            settings.sessions_before_long_break = sessions;
        }
        settings
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum IpcRequest {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Reset the countdown for the current mode
    Reset,
    /// Switch to another mode
    Switch {
        /// Target mode
        mode: Mode,
    },
    /// Query the current timer state
    Status,
    /// Show or update the duration settings
    Settings {
        /// Minute-denominated overrides; empty means show
        #[serde(flatten)]
        params: SettingsParams,
    },
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Whether the countdown is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Completed work session count
    #[serde(rename = "completedSessions", skip_serializing_if = "Option::is_none")]
    pub completed_sessions: Option<u32>,
    /// Elapsed fraction of the current mode, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Current duration settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<TimerSettings>,
}

impl ResponseData {
    /// Creates response data from a timer state snapshot.
    pub fn from_state(state: &TimerState, progress: f64) -> Self {
        Self {
            mode: Some(state.mode.as_str().to_string()),
            running: Some(state.is_running),
            remaining_seconds: Some(state.time_remaining),
            completed_sessions: Some(state.completed_work_sessions),
            progress: Some(progress),
            settings: None,
        }
    }

    /// Creates response data carrying only the settings.
    pub fn from_settings(settings: &TimerSettings) -> Self {
        Self {
            settings: Some(settings.clone()),
            ..Self::default()
        }
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
