//! 比較タイルのダウンロード保存
//!
//! Data URL はデコードして、http(s) の参照は取得してから
//! `{モデル名}_result.png` として書き出す。

use crate::backend::HttpBackend;
use crate::error::{BgCompareError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bg_compare_common::{ClientConfig, ComparisonTile, ImageRef};
use std::path::{Component, Path, PathBuf};

/// 参照先の画像をバイト列にする
pub async fn materialize(
    reference: &str,
    config: &ClientConfig,
    backend: &HttpBackend,
) -> Result<Vec<u8>> {
    match ImageRef::parse(reference) {
        ImageRef::Data { base64, .. } => decode_data(base64),
        image_ref @ ImageRef::Url(url) => {
            let absolute = if image_ref.is_absolute_url() {
                url.to_string()
            } else {
                resolve_relative(url, config)?
            };
            Ok(backend.fetch_bytes(&absolute).await?)
        }
    }
}

pub fn decode_data(payload: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| BgCompareError::Download(format!("Base64デコード失敗: {}", e)))
}

fn resolve_relative(path: &str, config: &ClientConfig) -> Result<String> {
    let base = config.base();
    if base.is_empty() {
        return Err(BgCompareError::Download(format!(
            "相対URLを解決できません（ベースURL未設定）: {}",
            path
        )));
    }
    Ok(format!("{}/{}", base, path.trim_start_matches('/')))
}

/// 出力ディレクトリ直下の単一のファイル名のみ許可する
fn check_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(BgCompareError::Download(format!(
            "保存できないファイル名です: {}",
            name
        ))),
    }
}

/// 全タイルのダウンロードを書き出し、書き出したパスを返す
pub async fn save_downloads(
    tiles: &[ComparisonTile],
    output_dir: &Path,
    config: &ClientConfig,
    backend: &HttpBackend,
) -> Result<Vec<PathBuf>> {
    // 1件でも不正な名前があれば何も書き出さない
    let downloads = tiles
        .iter()
        .map(|tile| {
            let download = tile.download();
            check_file_name(&download.file_name)?;
            Ok((tile, download))
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(downloads.len());
    for (tile, download) in downloads {
        let bytes = materialize(&download.href, config, backend).await?;
        let path = output_dir.join(&download.file_name);
        std::fs::write(&path, bytes)?;
        tracing::debug!(model = %tile.model, path = %path.display(), "download saved");
        written.push(path);
    }

    Ok(written)
}
