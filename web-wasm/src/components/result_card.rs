//! 比較タイル
//!
//! 通常は処理結果を表示し、ホバー・フォーカス中は元画像を全面に重ねる。

use bg_compare_common::{ComparisonTile, TileOverlay};
use leptos::prelude::*;

#[component]
pub fn ResultCard(tile: ComparisonTile, index: usize) -> impl IntoView {
    let (overlay, set_overlay) = signal(TileOverlay::default());
    let reveal = move || set_overlay.update(|o| o.enter());
    let restore = move || set_overlay.update(|o| o.leave());

    let download = tile.download();
    let display_name = tile.display_name();

    view! {
        <div
            class="result-card"
            style=format!("animation-delay: {}ms", index * 100)
            tabindex="0"
            on:mouseenter=move |_| reveal()
            on:mouseleave=move |_| restore()
            on:focusin=move |_| reveal()
            on:focusout=move |_| restore()
        >
            <div class="result-header">
                <h3>{display_name.clone()}</h3>
                <span class="model-badge">"AI MODEL"</span>
            </div>

            <div class="result-image">
                <img class="processed" src=tile.processed.clone() alt=display_name />
                <div class="original-overlay" class:visible=move || overlay.get().is_revealed()>
                    <img src=tile.original.clone() alt="Original" />
                    <span class="overlay-label">
                        {move || overlay.get().label().unwrap_or_default()}
                    </span>
                </div>
            </div>

            <div class="result-actions">
                <a class="btn btn-secondary" href=download.href download=download.file_name>
                    "Download HD"
                </a>
            </div>
        </div>
    }
}
