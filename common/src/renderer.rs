//! 比較表示
//!
//! 最新のスナップショットから表示内容を導出する。状態は持たない。

use crate::controller::{WorkflowSnapshot, WorkflowState};
use crate::result_set::ResultSet;

/// オーバーレイ表示中のラベル
pub const OVERLAY_LABEL: &str = "Viewing Original";
/// 送信中の表示
pub const LOADING_LABEL: &str = "Analyzing pixels...";
/// 結果一覧の見出し
pub const RESULTS_HEADING: &str = "Comparison Results";

/// モデル1つ分の比較タイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTile {
    pub model: String,
    pub processed: String,
    pub original: String,
}

/// ダウンロード操作（参照とファイル名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub href: String,
    pub file_name: String,
}

impl ComparisonTile {
    /// "birefnet-general" → "birefnet general"
    pub fn display_name(&self) -> String {
        self.model.replace('-', " ")
    }

    pub fn download_file_name(&self) -> String {
        download_file_name(&self.model)
    }

    pub fn download(&self) -> Download {
        Download {
            href: self.processed.clone(),
            file_name: self.download_file_name(),
        }
    }
}

pub fn download_file_name(model: &str) -> String {
    format!("{}_result.png", model)
}

/// "original" 以外のキーごとに1枚、挿入順で生成する
pub fn tiles(result_set: &ResultSet) -> Vec<ComparisonTile> {
    let original = result_set.original();
    result_set
        .models()
        .map(|(model, processed)| ComparisonTile {
            model: model.to_string(),
            processed: processed.to_string(),
            original: original.to_string(),
        })
        .collect()
}

pub fn summary_label(tile_count: usize) -> String {
    format!("Showing {} models", tile_count)
}

/// タイルのホバー状態
///
/// ポインタが乗っている間（またはフォーカス中）は元画像を全面に重ねる。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TileOverlay {
    revealed: bool,
}

impl TileOverlay {
    pub fn enter(&mut self) {
        self.revealed = true;
    }

    pub fn leave(&mut self) {
        self.revealed = false;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// 前面に見えている画像
    pub fn visible<'a>(&self, tile: &'a ComparisonTile) -> &'a str {
        if self.revealed {
            &tile.original
        } else {
            &tile.processed
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        self.revealed.then_some(OVERLAY_LABEL)
    }
}

/// スナップショットから導出した画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonView {
    /// 「処理開始」ボタンを出すか
    pub show_submit: bool,
    pub loading: bool,
    pub tiles: Vec<ComparisonTile>,
    pub summary: Option<String>,
    pub error: Option<String>,
}

impl ComparisonView {
    pub fn from_snapshot(snapshot: &WorkflowSnapshot) -> Self {
        let tiles = snapshot.state.result_set().map(tiles).unwrap_or_default();
        let summary = match &snapshot.state {
            WorkflowState::Succeeded(_) => Some(summary_label(tiles.len())),
            _ => None,
        };
        Self {
            show_submit: snapshot.can_submit(),
            loading: snapshot.state == WorkflowState::Submitting,
            tiles,
            summary,
            error: snapshot.state.error().map(str::to_string),
        }
    }
}
