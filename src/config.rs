use crate::error::{BgCompareError, Result};
use bg_compare_common::config::DEFAULT_MIN_DISPLAY_DELAY_MS;
use bg_compare_common::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// バックエンドURLを上書きする環境変数
pub const API_URL_ENV: &str = "BG_COMPARE_API_URL";

/// バックエンドの既定の待受アドレス
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: Option<String>,
    pub min_display_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Some(DEFAULT_API_URL.into()),
            min_display_delay_ms: DEFAULT_MIN_DISPLAY_DELAY_MS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BgCompareError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("bg-compare").join("config.json"))
    }

    /// 環境変数を優先し、なければ設定ファイルの値
    pub fn api_url(&self) -> Option<String> {
        resolve_api_url(std::env::var(API_URL_ENV).ok(), self.api_url.as_deref())
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(BgCompareError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.api_url = Some(trimmed.to_string());
        self.save()
    }

    /// コントローラへ注入する接続設定
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url())
            .with_min_display_delay(Duration::from_millis(self.min_display_delay_ms))
    }
}

fn resolve_api_url(env_value: Option<String>, file_value: Option<&str>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file_value.map(str::to_string))
}
