//! Tomato Timer Library
//!
//! This library provides the core functionality for the tomato timer CLI.
//! It includes:
//! - Timer engine with mode transitions, countdown and session counting
//! - Settings persistence with bounds validation
//! - Session-complete alerting (chime and desktop notification)
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Type definitions for settings, state and the wire format

pub mod alert;
pub mod cli;
pub mod daemon;
pub mod engine;
pub mod settings;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    IpcRequest, IpcResponse, Mode, ResponseData, SettingsParams, SettingsViolation, TimerSettings,
    TimerState,
};

// Re-export engine types
pub use engine::{
    ChannelObserver, EngineError, MockObserver, TimerEngine, TimerEvent, TimerObserver,
};

// Re-export settings types
pub use settings::{JsonSettingsStore, MockSettingsStore, SettingsError, SettingsStore};

// Re-export alert types
pub use alert::{
    AlertError, AlertSignaler, ChimePlayer, DesktopAlertSignaler, DesktopNotifier,
    MockAlertSignaler,
};

// Re-export daemon types
pub use daemon::{Daemon, IpcServer, RequestHandler};
