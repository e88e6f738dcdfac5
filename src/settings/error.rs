//! Settings persistence error types.

use thiserror::Error;

/// Errors that can occur while loading or saving the settings blob.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The home directory could not be determined.
    #[error("ホームディレクトリを特定できません")]
    HomeDirNotFound,

    /// Reading the settings file failed.
    #[error("設定ファイルの読み込みに失敗しました: {0}")]
    ReadError(String),

    /// Writing the settings file failed.
    #[error("設定ファイルの書き込みに失敗しました: {0}")]
    WriteError(String),

    /// The settings file exists but is not valid JSON.
    #[error("設定ファイルのパースに失敗しました: {0}")]
    ParseError(String),

    /// Serializing the settings failed.
    #[error("設定のシリアライズに失敗しました: {0}")]
    SerializeError(String),
}
