//! 送信中インジケータ

use bg_compare_common::renderer::LOADING_LABEL;
use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="spinner" />
            <p class="loading-text">{LOADING_LABEL}</p>
        </div>
    }
}
