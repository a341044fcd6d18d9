//! バックエンド接続設定
//!
//! ベースURLは呼び出し時に環境から読まず、コントローラ生成時に注入する。

use std::time::Duration;

/// アップロード先のパス
pub const REMOVE_BG_PATH: &str = "/remove-bg";

/// マルチパートのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// モデル一覧のパス
pub const MODELS_PATH: &str = "/models";

/// 表示のチラつきを抑えるための最小待ち時間（ミリ秒）
pub const DEFAULT_MIN_DISPLAY_DELAY_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `None` または空文字なら相対パスへ送信する
    pub base_url: Option<String>,
    /// 送信前に入れる待ち時間。タイムアウトやリトライ間隔ではない
    pub min_display_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            min_display_delay: Duration::from_millis(DEFAULT_MIN_DISPLAY_DELAY_MS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url,
            ..Default::default()
        }
    }

    pub fn with_min_display_delay(mut self, delay: Duration) -> Self {
        self.min_display_delay = delay;
        self
    }

    /// 末尾スラッシュを除いたベースURL。未設定なら空文字
    pub fn base(&self) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .trim_end_matches('/')
    }

    pub fn remove_bg_url(&self) -> String {
        format!("{}{}", self.base(), REMOVE_BG_PATH)
    }

    pub fn models_url(&self) -> String {
        format!("{}{}", self.base(), MODELS_PATH)
    }
}
