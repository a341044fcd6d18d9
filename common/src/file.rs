//! 選択中の入力画像

use std::fmt;
use std::sync::Arc;

/// 拡張子 → MIMEタイプ
const IMAGE_CONTENT_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
];

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// アップロード対象のファイル
///
/// 中身は不透明なバイト列として扱う。`Arc`で共有するため複製は安価。
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    data: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name).to_string();
        Self {
            name,
            content_type,
            data: data.into(),
        }
    }

    /// ブラウザ等が報告したMIMEタイプで上書きする。空なら推測値のまま
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        if !content_type.trim().is_empty() {
            self.content_type = content_type;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// "1.50 MB" 形式のサイズ表示
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// ファイル名の拡張子からMIMEタイプを推測
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return FALLBACK_CONTENT_TYPE,
    };
    IMAGE_CONTENT_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("photo.jpg"), "image/jpeg");
        assert_eq!(guess_content_type("PHOTO.JPEG"), "image/jpeg");
        assert_eq!(guess_content_type("cat.webp"), "image/webp");
        assert_eq!(guess_content_type("scan.Png"), "image/png");
        assert_eq!(guess_content_type("notes.txt"), "application/octet-stream");
        assert_eq!(guess_content_type("README"), "application/octet-stream");
    }

    #[test]
    fn test_size_label() {
        let file = SelectedFile::new("big.png", vec![0u8; 1024 * 1024 * 3 / 2]);
        assert_eq!(file.size(), 1_572_864);
        assert_eq!(file.size_label(), "1.50 MB");

        let empty = SelectedFile::new("empty.png", Vec::new());
        assert_eq!(empty.size_label(), "0.00 MB");
    }

    #[test]
    fn test_with_content_type() {
        let file = SelectedFile::new("upload", vec![1, 2, 3]).with_content_type("image/heic");
        assert_eq!(file.content_type(), "image/heic");

        let file = SelectedFile::new("a.png", vec![1]).with_content_type("");
        assert_eq!(file.content_type(), "image/png");
    }

    #[test]
    fn test_debug_omits_payload() {
        let file = SelectedFile::new("a.png", vec![0xde, 0xad, 0xbe, 0xef]);
        let debug = format!("{:?}", file);
        assert!(debug.contains("a.png"));
        assert!(debug.contains("size: 4"));
        assert!(!debug.contains("222"));
    }
}
