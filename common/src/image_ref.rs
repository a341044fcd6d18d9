//! 画像参照（URL または Data URL）の判別

/// 結果セットの値が指す画像
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// "data:image/png;base64,iVBOR..." 形式
    Data { mime_type: &'a str, base64: &'a str },
    /// http(s) の絶対URL、または相対パス
    Url(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn parse(reference: &'a str) -> Self {
        if let Some(rest) = reference.strip_prefix("data:") {
            if let Some((meta, payload)) = rest.split_once(',') {
                if let Some(mime_type) = meta.strip_suffix(";base64") {
                    return ImageRef::Data { mime_type, base64: payload };
                }
            }
        }
        ImageRef::Url(reference)
    }

    pub fn is_data(&self) -> bool {
        matches!(self, ImageRef::Data { .. })
    }

    /// スキーム付きの絶対URLか
    pub fn is_absolute_url(&self) -> bool {
        match self {
            ImageRef::Url(url) => url.starts_with("http://") || url.starts_with("https://"),
            ImageRef::Data { .. } => false,
        }
    }
}
