//! IPC client used by the CLI to talk to the daemon.
//!
//! Each command is one connection: the client writes a request line,
//! reads the response line, and promotes an error-status response to a
//! command failure. Connection attempts are retried a few times so a
//! daemon that is still starting up does not fail the command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::cli::commands::SettingsArgs;
use crate::daemon::ipc::DEFAULT_SOCKET_PATH;
use crate::types::{IpcRequest, IpcResponse, Mode};

/// Time allowed for the connect handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Time allowed for the daemon's response line.
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Total connection attempts per command.
const MAX_ATTEMPTS: u32 = 3;

/// Base backoff between attempts; grows linearly per attempt.
const BACKOFF: Duration = Duration::from_millis(500);

// ============================================================================
// IpcClient
// ============================================================================

/// One-shot request client for the daemon socket.
pub struct IpcClient {
    socket_path: PathBuf,
}

impl IpcClient {
    /// Creates a client pointed at the default socket path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().context("ホームディレクトリを特定できません")?;
        Ok(Self {
            socket_path: home.join(DEFAULT_SOCKET_PATH),
        })
    }

    /// Creates a client for a specific socket path.
    pub fn with_socket_path(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }

    /// Starts or resumes the countdown.
    pub async fn start(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Start).await
    }

    /// Pauses the countdown.
    pub async fn pause(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Pause).await
    }

    /// Resets the countdown for the current mode.
    pub async fn reset(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Reset).await
    }

    /// Switches the timer to another mode.
    pub async fn switch(&self, mode: Mode) -> Result<IpcResponse> {
        self.request(&IpcRequest::Switch { mode }).await
    }

    /// Queries the current timer state.
    pub async fn status(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Status).await
    }

    /// Shows or updates the duration settings.
    pub async fn settings(&self, args: &SettingsArgs) -> Result<IpcResponse> {
        self.request(&IpcRequest::Settings {
            params: args.to_params(),
        })
        .await
    }

    /// Runs one request with bounded retry.
    ///
    /// Only transport failures are retried. An error-status response is
    /// the daemon's rejection of the command itself and fails immediately.
    async fn request(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut attempt = 1;

        let response = loop {
            match self.exchange(request).await {
                Ok(response) => break response,
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!("リクエスト失敗 (試行 {}/{}): {}", attempt, MAX_ATTEMPTS, e);
                    tokio::time::sleep(BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        if response.status == "error" {
            bail!("{}", response.message);
        }

        Ok(response)
    }

    /// One connect / write / read cycle.
    async fn exchange(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let stream = timeout(CONNECT_TIMEOUT, UnixStream::connect(&self.socket_path))
            .await
            .context("接続がタイムアウトしました")?
            .context("Daemonに接続できません。`tomato daemon` が起動しているか確認してください")?;

        let mut line = serde_json::to_vec(request).context("リクエストを組み立てられません")?;
        line.push(b'\n');

        let mut stream = BufReader::new(stream);
        stream
            .get_mut()
            .write_all(&line)
            .await
            .context("リクエストを送信できません")?;

        let mut reply = String::new();
        let read = timeout(REPLY_TIMEOUT, stream.read_line(&mut reply))
            .await
            .context("応答の待機がタイムアウトしました")?
            .context("応答を受信できません")?;

        if read == 0 {
            bail!("Daemonが応答せずに接続を閉じました");
        }

        serde_json::from_str(reply.trim_end()).context("応答を解釈できません")
    }
}

// ============================================================================
// Tests
// ============================================================================
