//! Unix-socket IPC for the tomato timer daemon.
//!
//! The wire format is one JSON document per line: the client writes a
//! request terminated by `\n`, the daemon answers with a response line and
//! the connection is done. `IpcServer` owns the listener and the socket
//! file; `RequestHandler` maps requests onto the shared engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::engine::TimerEngine;
use crate::types::{IpcRequest, IpcResponse, Mode, ResponseData, SettingsParams};

/// Default socket path relative to the home directory.
pub const DEFAULT_SOCKET_PATH: &str = ".tomato/tomato.sock";

/// Upper bound on a single request line, in bytes.
const MAX_REQUEST_BYTES: u64 = 4096;

/// How long the daemon waits for the request line of an accepted
/// connection.
const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// IpcError
// ============================================================================

/// Failures while exchanging a request/response pair.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// The peer closed the connection before sending a full line.
    #[error("接続がリクエストの途中で切断されました")]
    Closed,

    /// Reading from the socket failed.
    #[error("リクエストの読み込みに失敗しました: {0}")]
    Read(String),

    /// No request line arrived within the receive window.
    #[error("リクエストの待機がタイムアウトしました")]
    Timeout,

    /// The request line exceeded the size bound.
    #[error("リクエストが大きすぎます (上限 {MAX_REQUEST_BYTES} バイト)")]
    TooLarge,

    /// The request line was not a valid command document.
    #[error("リクエストを解釈できません: {0}")]
    Malformed(String),
}

// ============================================================================
// IpcServer
// ============================================================================

/// Listener half of the daemon IPC.
///
/// Binding removes a stale socket file left behind by a previous daemon
/// run; the file is removed again when the server is dropped.
pub struct IpcServer {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl IpcServer {
    /// Binds the server to the given socket path.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// socket cannot be bound.
    pub fn bind(socket_path: &Path) -> Result<Self> {
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("ソケットディレクトリを作成できません: {:?}", parent))?;
        }

        // A daemon that died without cleanup leaves the file behind;
        // binding over it requires removing it first.
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("既存のソケットを削除できません: {:?}", socket_path))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("ソケットをバインドできません: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Waits for the next client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting on the listener fails.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _) = self
            .listener
            .accept()
            .await
            .context("接続を受け付けられません")?;
        Ok(stream)
    }

    /// Reads one request line from the connection.
    ///
    /// # Errors
    ///
    /// Returns an `IpcError` if the line does not arrive in time, exceeds
    /// the size bound, or does not parse as a request.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest, IpcError> {
        // The +1 lets an exactly-at-limit line through while still
        // detecting an oversized one.
        let mut reader = BufReader::new((&mut *stream).take(MAX_REQUEST_BYTES + 1));
        let mut line = String::new();

        let read = timeout(RECEIVE_TIMEOUT, reader.read_line(&mut line))
            .await
            .map_err(|_| IpcError::Timeout)?
            .map_err(|e| IpcError::Read(e.to_string()))?;

        if read == 0 {
            return Err(IpcError::Closed);
        }
        if line.len() as u64 > MAX_REQUEST_BYTES {
            return Err(IpcError::TooLarge);
        }

        serde_json::from_str(line.trim_end()).map_err(|e| IpcError::Malformed(e.to_string()))
    }

    /// Writes one response line to the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the socket write fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let mut payload =
            serde_json::to_vec(response).context("レスポンスをシリアライズできません")?;
        payload.push(b'\n');

        stream
            .write_all(&payload)
            .await
            .context("レスポンスを送信できません")?;
        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Maps IPC requests onto the shared timer engine.
///
/// Engine errors become error responses; the connection-level transport
/// never sees them.
pub struct RequestHandler {
    engine: Arc<Mutex<TimerEngine>>,
}

impl RequestHandler {
    /// Creates a handler around the shared engine.
    pub fn new(engine: Arc<Mutex<TimerEngine>>) -> Self {
        Self { engine }
    }

    /// Executes one request and produces its response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Switch { mode } => self.handle_switch(mode).await,
            IpcRequest::Status => self.handle_status().await,
            IpcRequest::Settings { params } => self.handle_settings(params).await,
        }
    }

    async fn handle_start(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.start() {
            Ok(()) => IpcResponse::success("タイマーを開始しました", Some(snapshot(&engine))),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        engine.pause();
        IpcResponse::success("タイマーを一時停止しました", Some(snapshot(&engine)))
    }

    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        engine.reset();
        IpcResponse::success("タイマーをリセットしました", Some(snapshot(&engine)))
    }

    async fn handle_switch(&self, mode: Mode) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.switch_mode(mode) {
            Ok(()) => IpcResponse::success("モードを切り替えました", Some(snapshot(&engine))),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;

        IpcResponse::success("", Some(snapshot(&engine)))
    }

    /// Without overrides this reports the active settings; with overrides
    /// it validates, applies, and persists them.
    async fn handle_settings(&self, params: SettingsParams) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if params.is_empty() {
            return IpcResponse::success("", Some(ResponseData::from_settings(engine.settings())));
        }

        let candidate = params.apply_to(engine.settings());
        match engine.apply_settings(candidate) {
            Ok(()) => IpcResponse::success(
                "設定を保存しました",
                Some(ResponseData::from_settings(engine.settings())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }
}

/// Builds the state payload for a timer response.
fn snapshot(engine: &TimerEngine) -> ResponseData {
    ResponseData::from_state(engine.state(), engine.progress_fraction())
}

// ============================================================================
// Tests
// ============================================================================
