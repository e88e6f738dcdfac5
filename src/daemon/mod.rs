//! Daemon module for the tomato timer.
//!
//! This module contains the engine host:
//! - `ipc`: Unix socket server and request dispatch
//! - `Daemon`: composition root that loads settings, owns the 1 Hz tick
//!   task, logs engine events, and serves IPC requests until shutdown

pub mod ipc;

pub use ipc::{IpcServer, RequestHandler};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::alert::DesktopAlertSignaler;
use crate::engine::{ChannelObserver, TimerEngine, TimerEvent};
use crate::settings::{JsonSettingsStore, SettingsStore};
use crate::types::{IpcResponse, TimerSettings};

// ============================================================================
// Daemon
// ============================================================================

/// Background daemon hosting the timer engine.
pub struct Daemon {
    /// Unix socket path served by the daemon
    socket_path: PathBuf,
}

impl Daemon {
    /// Creates a daemon using the default socket path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().context("ホームディレクトリを特定できません")?;
        Ok(Self {
            socket_path: home.join(ipc::DEFAULT_SOCKET_PATH),
        })
    }

    /// Creates a daemon with a custom socket path.
    pub fn with_socket_path(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }

    /// Runs the daemon until ctrl-c.
    ///
    /// Composition: settings are loaded once at startup (absent blob means
    /// defaults, a corrupt blob is logged and ignored), the engine is built
    /// with the file store and the desktop signaler, a channel observer
    /// feeds the event log, and the tick task drives the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound or settings storage
    /// cannot be located.
    pub async fn run(&self) -> Result<()> {
        let store = JsonSettingsStore::with_default_path()?;
        let settings = match store.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => TimerSettings::default(),
            Err(e) => {
                warn!("設定の読み込みに失敗したためデフォルト設定を使用します: {}", e);
                TimerSettings::default()
            }
        };

        let signaler = DesktopAlertSignaler::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut engine = TimerEngine::new(settings, Box::new(store), Box::new(signaler));
        engine.subscribe(Box::new(ChannelObserver::new(event_tx)));
        let engine = Arc::new(Mutex::new(engine));

        let ticker = tokio::spawn(run_ticker(engine.clone()));
        let logger = tokio::spawn(log_events(event_rx));

        let server = IpcServer::bind(&self.socket_path)?;
        let handler = RequestHandler::new(engine);

        info!("Daemonを起動しました: {:?}", server.socket_path());

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("終了シグナルを受信しました");
                    break;
                }
                accepted = server.accept() => {
                    let mut stream = match accepted {
                        Ok(stream) => stream,
                        Err(e) => {
                            warn!("接続の受け付けに失敗しました: {}", e);
                            continue;
                        }
                    };

                    let response = match IpcServer::receive_request(&mut stream).await {
                        Ok(request) => handler.handle(request).await,
                        Err(e) => {
                            warn!("{}", e);
                            IpcResponse::error(e.to_string())
                        }
                    };

                    if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                        warn!("レスポンスの送信に失敗しました: {}", e);
                    }
                }
            }
        }

        ticker.abort();
        logger.abort();
        Ok(())
    }
}

// ============================================================================
// Tick task
// ============================================================================

/// Drives the engine countdown at 1 Hz.
///
/// The engine lock is taken per tick, so IPC commands interleave with the
/// countdown and a pause applied by a command is observed before the next
/// tick can decrement. Ticks landing while the timer is idle are no-ops
/// inside the engine.
pub async fn run_ticker(engine: Arc<Mutex<TimerEngine>>) {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        engine.lock().await.tick();
    }
}

// ============================================================================
// Event log task
// ============================================================================

/// Drains engine events into the tracing log.
async fn log_events(mut rx: mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            TimerEvent::SessionCompleted { completed } => {
                info!("セッションが完了しました: {}", completed.as_str());
            }
            TimerEvent::StateChanged { state } => {
                debug!(
                    mode = state.mode.as_str(),
                    remaining = state.time_remaining,
                    running = state.is_running,
                    sessions = state.completed_work_sessions,
                    "state changed"
                );
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
