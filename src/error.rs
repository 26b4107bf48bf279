//! エラー型定義モジュール

use std::io;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("環境変数 {0} が設定されていません")]
    MissingCredential(&'static str),

    #[error("無効なワークスペースID: {0}")]
    InvalidWorkspaceId(String),

    #[error("無効な設定値: {0}")]
    InvalidValue(&'static str),
}

/// 目標時間の解析エラー
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GoalParseError {
    #[error("目標時間が空です")]
    Empty,

    #[error("目標時間の形式が不正です: {0}")]
    InvalidFormat(String),
}

/// タイムエントリ取得エラー
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("認証に失敗しました (HTTP {0})。APIトークンを確認してください")]
    Auth(u16),

    #[error("サーバーエラー (HTTP {0})")]
    Status(u16),

    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("レスポンス解析エラー: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTPステータスコードから分類する
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => FetchError::Auth(status),
            _ => FetchError::Status(status),
        }
    }

    /// 監視ループを止めるべきエラーか
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Auth(_))
    }
}

/// 監視ループエラー
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("取得エラー: {0}")]
    FetchError(#[from] FetchError),

    #[error("出力エラー: {0}")]
    IoError(#[from] io::Error),

    #[error("シグナルハンドラーエラー: {0}")]
    SignalHandlerError(String),
}
