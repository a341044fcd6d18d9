//! ファイル取り込み
//!
//! ファイル選択ダイアログまたはドラッグ&ドロップから最初の1枚だけを受け取り、
//! 「ファイル選択」イベントを発行する。I/Oはここでは行わない。

use crate::file::SelectedFile;

/// ドロップゾーンの案内文（ドラッグ中）
pub const DROP_PROMPT_ACTIVE: &str = "Drop it here!";
/// ドロップゾーンの案内文（通常時）
pub const DROP_PROMPT_IDLE: &str = "Upload an Image";
/// ファイル選択ダイアログの accept 属性
pub const PICKER_ACCEPT: &str = "image/*";

/// ポインタのドラッグ段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
    Drop,
}

/// 取り込み層からコントローラへ伝えるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionEvent {
    FileSelected(SelectedFile),
    Cleared,
}

#[derive(Debug, Default)]
pub struct FileIngestion {
    selected: Option<SelectedFile>,
    drag_active: bool,
}

impl FileIngestion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// 表示専用。正しさには関与しない
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn prompt(&self) -> &'static str {
        if self.drag_active {
            DROP_PROMPT_ACTIVE
        } else {
            DROP_PROMPT_IDLE
        }
    }

    pub fn drag(&mut self, phase: DragPhase) {
        self.drag_active = matches!(phase, DragPhase::Enter | DragPhase::Over);
    }

    /// ドロップされたファイル群を受け取る。2枚目以降は無視
    pub fn drop_files<I>(&mut self, files: I) -> Option<IngestionEvent>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.drag(DragPhase::Drop);
        self.take_first(files)
    }

    /// ファイル選択ダイアログの結果を受け取る。2枚目以降は無視
    pub fn pick_files<I>(&mut self, files: I) -> Option<IngestionEvent>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.take_first(files)
    }

    /// 1枚を直接選択する。既存の選択は置き換わる
    pub fn select(&mut self, file: SelectedFile) -> IngestionEvent {
        tracing::debug!(name = file.name(), size = file.size(), "file selected");
        self.selected = Some(file.clone());
        IngestionEvent::FileSelected(file)
    }

    /// 選択を解除する。何も選択されていなくてもリセットは伝播させる
    pub fn clear(&mut self) -> IngestionEvent {
        self.selected = None;
        self.drag_active = false;
        IngestionEvent::Cleared
    }

    fn take_first<I>(&mut self, files: I) -> Option<IngestionEvent>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        files.into_iter().next().map(|file| self.select(file))
    }
}
