//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Remove Backgrounds in Seconds."</h1>
            <p class="text-muted">
                "Upload your image and compare several background-removal models side by side."
            </p>
        </header>
    }
}
