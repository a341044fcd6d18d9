//! fetch API によるバックエンド呼び出し

use std::time::Duration;

use bg_compare_common::config::UPLOAD_FIELD;
use bg_compare_common::{Backend, Error, Result, SelectedFile};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, Response};

pub struct FetchBackend;

impl Backend for FetchBackend {
    async fn remove_background(&self, url: &str, file: &SelectedFile) -> Result<String> {
        let form = build_form(file).map_err(js_error)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        // Content-Type は boundary 付きでブラウザが設定する
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;

        let window = web_sys::window()
            .ok_or_else(|| Error::Transport("window is not available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            return Err(Error::Status {
                status: resp.status(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn pause(&self, delay: Duration) {
        gloo::timers::future::sleep(delay).await;
    }
}

/// `file` フィールド1つのフォームを作る
fn build_form(file: &SelectedFile) -> std::result::Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes());
    let parts = js_sys::Array::of1(&bytes);

    let props = BlobPropertyBag::new();
    props.set_type(file.content_type());
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, file.name())?;
    Ok(form)
}

fn js_error(value: JsValue) -> Error {
    Error::Transport(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_build_form_has_single_file_entry() {
        let file = SelectedFile::new("cat.png", vec![0x89, b'P', b'N', b'G']);
        let form = build_form(&file).expect("form");

        assert_eq!(form.get_all(UPLOAD_FIELD).length(), 1);
        let entry: web_sys::File = form.get(UPLOAD_FIELD).dyn_into().expect("file entry");
        assert_eq!(entry.name(), "cat.png");
        assert_eq!(entry.type_(), "image/png");
        assert_eq!(entry.size(), 4.0);
    }
}
