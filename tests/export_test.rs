//! ダウンロード保存テスト

use bg_compare::backend::HttpBackend;
use bg_compare::error::BgCompareError;
use bg_compare::export::{materialize, save_downloads};
use bg_compare_common::{tiles, ClientConfig, ResultSet};
use tempfile::tempdir;

// "png-bytes" / "jpg-bytes"
const RESPONSE: &str = r#"{
    "u2net": "data:image/png;base64,cG5nLWJ5dGVz",
    "skin-detector": "data:image/png;base64,cG5nLWJ5dGVz",
    "original": "data:image/jpeg;base64,anBnLWJ5dGVz"
}"#;

#[tokio::test]
async fn test_save_downloads_writes_model_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("results");
    let set = ResultSet::from_json(RESPONSE).expect("valid result set");

    let written = save_downloads(&tiles(&set), &out, &ClientConfig::default(), &HttpBackend::new())
        .await
        .expect("保存失敗");

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], out.join("u2net_result.png"));
    assert_eq!(written[1], out.join("skin-detector_result.png"));
    assert_eq!(std::fs::read(&written[1]).unwrap(), b"png-bytes");
    // 元画像は保存しない
    assert!(!out.join("original_result.png").exists());
}

#[tokio::test]
async fn test_save_downloads_rejects_path_in_model_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("results");
    let set = ResultSet::from_json(
        r#"{
            "u2net": "data:image/png;base64,cG5n",
            "original": "data:image/png;base64,cG5n",
            "../escaped": "data:image/png;base64,cG5n"
        }"#,
    )
    .expect("valid result set");

    let err = save_downloads(&tiles(&set), &out, &ClientConfig::default(), &HttpBackend::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BgCompareError::Download(_)));
    assert!(!dir.path().join("escaped_result.png").exists());
    // 先に並ぶ正常なモデルも書き出さない
    assert!(!out.join("u2net_result.png").exists());
}

#[tokio::test]
async fn test_save_downloads_rejects_absolute_model_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let set = ResultSet::from_json(
        r#"{"original": "data:image/png;base64,cG5n", "/abs": "data:image/png;base64,cG5n"}"#,
    )
    .expect("valid result set");

    let err = save_downloads(&tiles(&set), dir.path(), &ClientConfig::default(), &HttpBackend::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BgCompareError::Download(_)));
}

#[tokio::test]
async fn test_save_downloads_no_tiles() {
    let dir = tempdir().expect("Failed to create temp dir");
    let set = ResultSet::from_json(r#"{"original":"data:image/png;base64,AA=="}"#).unwrap();

    let written = save_downloads(&tiles(&set), dir.path(), &ClientConfig::default(), &HttpBackend::new())
        .await
        .unwrap();
    assert!(written.is_empty());
}

#[tokio::test]
async fn test_materialize_relative_without_base() {
    let err = materialize("/outputs/u2net.png", &ClientConfig::default(), &HttpBackend::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BgCompareError::Download(_)));
}

#[tokio::test]
async fn test_materialize_invalid_base64() {
    let err = materialize("data:image/png;base64,@@@", &ClientConfig::default(), &HttpBackend::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BgCompareError::Download(_)));
}
