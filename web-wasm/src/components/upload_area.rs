//! アップロードエリアコンポーネント
//!
//! ドロップまたはファイル選択で最初の1枚だけを読み込み、取り込みイベントを親へ渡す。

use bg_compare_common::ingestion::{DROP_PROMPT_ACTIVE, DROP_PROMPT_IDLE, PICKER_ACCEPT};
use bg_compare_common::{DragPhase, FileIngestion, IngestionEvent, SelectedFile};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, File, HtmlInputElement, MouseEvent};

#[component]
pub fn UploadArea<F>(on_event: F) -> impl IntoView
where
    F: Fn(IngestionEvent) + 'static + Clone + Send + Sync,
{
    let ingestion = StoredValue::new_local(FileIngestion::new());
    let (is_drag_active, set_is_drag_active) = signal(false);
    let (selected, set_selected) = signal(None::<SelectedFile>);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let drag = move |ev: DragEvent, phase: DragPhase| {
        ev.prevent_default();
        ev.stop_propagation();
        ingestion.update_value(|i| i.drag(phase));
        set_is_drag_active.set(ingestion.with_value(|i| i.is_drag_active()));
    };

    // 読み込み完了後に選択を確定する
    let accept = {
        let on_event = on_event.clone();
        move |file: SelectedFile, dropped: bool| {
            let event = ingestion.try_update_value(|i| {
                if dropped {
                    i.drop_files(std::iter::once(file))
                } else {
                    i.pick_files(std::iter::once(file))
                }
            });
            if let Some(event) = event.flatten() {
                set_selected.set(ingestion.with_value(|i| i.selected().cloned()));
                on_event(event);
            }
        }
    };

    let on_drop = {
        let accept = accept.clone();
        move |ev: DragEvent| {
            drag(ev.clone(), DragPhase::Drop);
            let first = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0));
            if let Some(file) = first {
                let accept = accept.clone();
                read_file(file, move |file| accept(file, true));
            }
        }
    };

    let on_change = {
        let accept = accept.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            let first = input.files().and_then(|files| files.get(0));
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
            if let Some(file) = first {
                let accept = accept.clone();
                read_file(file, move |file| accept(file, false));
            }
        }
    };

    let on_clear = {
        let on_event = on_event.clone();
        move |ev: MouseEvent| {
            ev.stop_propagation();
            if let Some(event) = ingestion.try_update_value(|i| i.clear()) {
                set_selected.set(None);
                set_is_drag_active.set(false);
                on_event(event);
            }
        }
    };

    let open_picker = move |_: MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <Show
            when=move || selected.get().is_some()
            fallback=move || view! {
                <div
                    class=move || {
                        let mut classes = vec!["upload-area"];
                        if is_drag_active.get() {
                            classes.push("dragover");
                        }
                        classes.join(" ")
                    }
                    on:dragenter=move |ev: DragEvent| drag(ev, DragPhase::Enter)
                    on:dragover=move |ev: DragEvent| drag(ev, DragPhase::Over)
                    on:dragleave=move |ev: DragEvent| drag(ev, DragPhase::Leave)
                    on:drop=on_drop.clone()
                    on:click=open_picker
                >
                    <input
                        node_ref=input_ref
                        type="file"
                        class="hidden"
                        accept=PICKER_ACCEPT
                        on:change=on_change.clone()
                    />
                    <div class="upload-icon">"⬆"</div>
                    <p>{move || if is_drag_active.get() { DROP_PROMPT_ACTIVE } else { DROP_PROMPT_IDLE }}</p>
                    <p class="text-muted">"Drag and drop or click to browse"</p>
                </div>
            }
        >
            <div class="file-preview">
                <div class="file-info">
                    <p class="file-name">
                        {move || selected.get().map(|f| f.name().to_string()).unwrap_or_default()}
                    </p>
                    <p class="text-muted">
                        {move || selected.get().map(|f| f.size_label()).unwrap_or_default()}
                    </p>
                </div>
                <button class="btn btn-tertiary btn-small" on:click=on_clear.clone()>"✕"</button>
            </div>
        </Show>
    }
}

/// ファイルをバイト列として読み込む
fn read_file<F>(file: File, on_loaded: F)
where
    F: FnOnce(SelectedFile) + 'static,
{
    let name = file.name();
    let content_type = file.type_();
    spawn_local(async move {
        let blob = gloo::file::File::from(file);
        match gloo::file::futures::read_as_bytes(&blob).await {
            Ok(bytes) => on_loaded(SelectedFile::new(name, bytes).with_content_type(content_type)),
            Err(err) => gloo::console::error!(format!("failed to read {}: {}", name, err)),
        }
    });
}
