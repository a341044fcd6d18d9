use crate::error::{BgCompareError, Result};
use bg_compare_common::SelectedFile;
use std::path::Path;

/// 入力画像を読み込んで SelectedFile にする
///
/// MIMEタイプは中身から判定し、判定できなければ拡張子から推測する。
pub fn load_image(path: &Path) -> Result<SelectedFile> {
    if !path.exists() {
        return Err(BgCompareError::FileNotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(BgCompareError::NotAFile(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let sniffed = sniff_content_type(&bytes);
    let file = SelectedFile::new(file_name, bytes);
    let file = match sniffed {
        Some(mime) => file.with_content_type(mime),
        None => file,
    };

    tracing::debug!(
        path = %path.display(),
        content_type = file.content_type(),
        size = file.size(),
        "image loaded"
    );
    Ok(file)
}

fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}
