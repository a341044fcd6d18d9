//! ビルド時に埋め込むバックエンド設定

use bg_compare_common::ClientConfig;

/// `BG_COMPARE_API_URL` が未設定なら同一オリジンの相対パスへ送る
pub fn client_config() -> ClientConfig {
    ClientConfig::new(option_env!("BG_COMPARE_API_URL").map(str::to_string))
}
