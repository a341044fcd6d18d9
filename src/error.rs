use thiserror::Error;

#[derive(Error, Debug)]
pub enum BgCompareError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ファイルではありません: {0}")]
    NotAFile(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ダウンロード保存エラー: {0}")]
    Download(String),

    /// 画面に出すのは汎用メッセージのみ
    #[error("{0}")]
    Submission(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] bg_compare_common::Error),
}

pub type Result<T> = std::result::Result<T, BgCompareError>;
