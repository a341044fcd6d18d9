//! メインアプリケーションコンポーネント
//!
//! コントローラの購読者がスナップショットをシグナルへ流し、
//! 画面はそのシグナルから ComparisonView を導出する。

use bg_compare_common::{
    Backend, Completion, ComparisonView, IngestionEvent, SubmissionController, WorkflowState,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::backend::FetchBackend;
use crate::components::{
    header::Header,
    loading_indicator::LoadingIndicator,
    result_card::ResultCard,
    upload_area::UploadArea,
};
use crate::config::client_config;

#[component]
pub fn App() -> impl IntoView {
    let controller = StoredValue::new_local(SubmissionController::new(client_config()));
    let (snapshot, set_snapshot) = signal(controller.with_value(|c| c.snapshot()));
    controller.update_value(|c| c.subscribe(move |s| set_snapshot.set(s.clone())));

    let view_model = Memo::new(move |_| ComparisonView::from_snapshot(&snapshot.get()));

    let on_ingestion = move |event: IngestionEvent| {
        controller.update_value(|c| c.handle(event));
    };

    let on_submit = move |_: web_sys::MouseEvent| {
        let Some(pending) = controller.try_update_value(|c| c.begin_submit()).flatten() else {
            return;
        };
        spawn_local(async move {
            let backend = FetchBackend;
            if !pending.delay.is_zero() {
                backend.pause(pending.delay).await;
            }
            let outcome = backend.remove_background(&pending.url, &pending.file).await;
            let detail = controller
                .try_update_value(|c| {
                    let completion = c.complete(pending.generation, outcome);
                    failure_detail(c, completion)
                })
                .flatten();
            if let Some(detail) = detail {
                gloo::console::error!(format!("remove-bg submission failed: {}", detail));
            }
        });
    };

    view! {
        <div class="container">
            <Header />

            <div class="action-area">
                <UploadArea on_event=on_ingestion />

                <Show when=move || view_model.get().show_submit>
                    <button class="btn btn-primary btn-large" on:click=on_submit>
                        "Start Processing"
                    </button>
                </Show>
            </div>

            <Show when=move || view_model.get().loading>
                <LoadingIndicator />
            </Show>

            <Show when=move || view_model.get().summary.is_some()>
                <section class="results">
                    <div class="results-header">
                        <h2>{bg_compare_common::renderer::RESULTS_HEADING}</h2>
                        <span class="text-muted">
                            {move || view_model.get().summary.unwrap_or_default()}
                        </span>
                    </div>
                    <div class="results-grid">
                        <For
                            each=move || {
                                let generation = snapshot.get().generation;
                                view_model
                                    .get()
                                    .tiles
                                    .into_iter()
                                    .enumerate()
                                    .map(move |(index, tile)| (generation, index, tile))
                            }
                            key=|(generation, _, tile)| format!("{}-{}", generation, tile.model)
                            children=|(_, index, tile)| view! { <ResultCard tile=tile index=index /> }
                        />
                    </div>
                </section>
            </Show>

            {move || view_model.get().error.map(|message| view! {
                <div class="error-banner">{message}</div>
            })}
        </div>
    }
}

/// 反映済みの失敗について、開発者向けの詳細を返す
fn failure_detail(controller: &SubmissionController, completion: Completion) -> Option<String> {
    match (completion, controller.state()) {
        (Completion::Applied, WorkflowState::Failed(_)) => {
            controller.diagnostic().map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use bg_compare_common::{ClientConfig, SelectedFile};
    use std::time::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn selected() -> SubmissionController {
        let mut controller = SubmissionController::new(
            ClientConfig::default().with_min_display_delay(Duration::ZERO),
        );
        controller.handle(IngestionEvent::FileSelected(SelectedFile::new(
            "cat.png",
            vec![0x89, b'P', b'N', b'G'],
        )));
        controller
    }

    #[wasm_bindgen_test]
    fn wasm_validation_failure_reports_detail() {
        let mut controller = selected();
        let pending = controller.begin_submit().expect("submit");
        let completion = controller.complete(pending.generation, Ok(r#"{"u2net":"a.png"}"#.to_string()));

        let detail = failure_detail(&controller, completion).expect("detail");
        assert!(detail.contains("original"));
    }

    #[wasm_bindgen_test]
    fn wasm_success_and_stale_report_nothing() {
        let mut controller = selected();
        let stale = controller.begin_submit().expect("submit");
        controller.handle(IngestionEvent::Cleared);
        let completion = controller.complete(stale.generation, Ok("not json".to_string()));
        assert!(failure_detail(&controller, completion).is_none());

        let mut controller = selected();
        let pending = controller.begin_submit().expect("submit");
        let completion =
            controller.complete(pending.generation, Ok(r#"{"original":"o.png"}"#.to_string()));
        assert!(failure_detail(&controller, completion).is_none());
    }
}
