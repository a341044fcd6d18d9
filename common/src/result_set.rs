//! バックエンドの応答（モデル名 → 画像参照）
//!
//! 応答は描画前に型付きで検証する。1件でも不正なら全体を不正として扱い、
//! 部分的な描画は行わない。

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 未加工の入力画像を指す予約キー
pub const ORIGINAL_KEY: &str = "original";

/// 検証済みの結果セット
///
/// 挿入順を保持し、その順序がそのまま描画順になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<(String, String)>,
}

impl ResultSet {
    /// レスポンス本文をパースして検証する
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::Validation(e.to_string()))
    }

    /// 任意の (キー, 値) 列から構築する。JSONと同じ規則で検証する
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = Builder::default();
        for (key, value) in entries {
            builder.push(key.into(), value.into()).map_err(Error::Validation)?;
        }
        builder.finish().map_err(Error::Validation)
    }

    /// 入力画像の参照
    pub fn original(&self) -> &str {
        self.get(ORIGINAL_KEY).unwrap_or_default()
    }

    pub fn get(&self, model: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == model)
            .map(|(_, value)| value.as_str())
    }

    /// "original" を含む全エントリ（挿入順）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// モデル出力のみ（挿入順）
    pub fn models(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(key, _)| *key != ORIGINAL_KEY)
    }

    pub fn model_count(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// "original" が必須のため常に false
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
struct Builder {
    entries: Vec<(String, String)>,
    seen: HashSet<String>,
}

impl Builder {
    fn push(&mut self, key: String, value: String) -> std::result::Result<(), String> {
        if key.is_empty() {
            return Err("model identifier must not be empty".to_string());
        }
        if !self.seen.insert(key.clone()) {
            return Err(format!("duplicate model identifier `{}`", key));
        }
        self.entries.push((key, value));
        Ok(())
    }

    fn finish(self) -> std::result::Result<ResultSet, String> {
        if !self.seen.contains(ORIGINAL_KEY) {
            return Err(format!("missing required `{}` entry", ORIGINAL_KEY));
        }
        Ok(ResultSet { entries: self.entries })
    }
}

struct ResultSetVisitor;

impl<'de> Visitor<'de> for ResultSetVisitor {
    type Value = ResultSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object mapping model identifiers to image references")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = Builder::default();
        while let Some(key) = map.next_key::<String>()? {
            let value = match map.next_value::<serde_json::Value>()? {
                serde_json::Value::String(s) => s,
                other => {
                    return Err(de::Error::custom(format!(
                        "model `{}` has a non-string image reference: {}",
                        key, other
                    )))
                }
            };
            builder.push(key, value).map_err(de::Error::custom)?;
        }
        builder.finish().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ResultSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResultSetVisitor)
    }
}

impl Serialize for ResultSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let set = ResultSet::from_json(
            r#"{"original":"o.png","modelA":"a.png","modelB":"b.png"}"#,
        )
        .expect("valid result set");

        assert_eq!(set.original(), "o.png");
        assert_eq!(set.len(), 3);
        assert_eq!(set.model_count(), 2);
        let models: Vec<_> = set.models().collect();
        assert_eq!(models, vec![("modelA", "a.png"), ("modelB", "b.png")]);
    }

    #[test]
    fn test_original_may_come_last() {
        let set = ResultSet::from_json(
            r#"{"u2net":"data:image/png;base64,AAA","isnet-general-use":"x.png","original":"data:image/jpeg;base64,BBB"}"#,
        )
        .expect("valid result set");

        let names: Vec<_> = set.models().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["u2net", "isnet-general-use"]);
        assert_eq!(set.original(), "data:image/jpeg;base64,BBB");
    }

    #[test]
    fn test_missing_original_is_validation_error() {
        let err = ResultSet::from_json(r#"{"modelA":"a.png"}"#).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("original"));
    }

    #[test]
    fn test_non_string_value_rejects_whole_set() {
        let err = ResultSet::from_json(r#"{"original":"o.png","modelA":"a.png","modelB":null}"#)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("modelB"));

        let err = ResultSet::from_json(r#"{"original":"o.png","modelA":42}"#).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_non_object_body() {
        for body in [r#"["original"]"#, r#""original""#, "null", "", "<html>502</html>"] {
            let err = ResultSet::from_json(body).unwrap_err();
            assert!(err.is_validation(), "body {:?} should fail validation", body);
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = ResultSet::from_json(r#"{"original":"o.png","":"a.png"}"#).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = ResultSet::from_json(r#"{"original":"o.png","m":"a.png","m":"b.png"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_only_original() {
        let set = ResultSet::from_json(r#"{"original":"o.png"}"#).expect("valid");
        assert_eq!(set.model_count(), 0);
        assert_eq!(set.models().count(), 0);
    }

    #[test]
    fn test_from_entries() {
        let set = ResultSet::from_entries([("original", "o"), ("m", "x")]).expect("valid");
        assert_eq!(set.get("m"), Some("x"));
        assert!(ResultSet::from_entries([("m", "x")]).is_err());
    }

    #[test]
    fn test_serialize_keeps_order() {
        let set = ResultSet::from_entries([("original", "o"), ("z", "1"), ("a", "2")]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"original":"o","z":"1","a":"2"}"#);
    }
}
