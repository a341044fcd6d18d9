//! エラー型定義

use thiserror::Error;

/// ユーザーに表示する唯一のエラーメッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Unable to connect to the processing server.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// バックエンドに到達できなかった
    #[error("Transport error: {0}")]
    Transport(String),

    /// バックエンドが成功以外のステータスを返した
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// レスポンスがResultSetとして不正
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 通信失敗（到達不可・非成功ステータス）か
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Status { .. })
    }

    /// レスポンス検証失敗か
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Json(_))
    }

    /// 画面に出すメッセージ。詳細は診断ログ側にのみ残す
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
