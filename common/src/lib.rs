//! Background-removal comparison workflow
//!
//! CLIとWeb(WASM)で共有されるワークフロー本体:
//! ファイル取り込み → 送信コントローラ → 結果セット検証 → 比較タイル

pub mod config;
pub mod controller;
pub mod error;
pub mod file;
pub mod image_ref;
pub mod ingestion;
pub mod renderer;
pub mod result_set;

pub use config::ClientConfig;
pub use controller::{
    Backend, Completion, PendingSubmission, SubmissionController, WorkflowSnapshot, WorkflowState,
};
pub use error::{Error, Result, GENERIC_FAILURE_MESSAGE};
pub use file::SelectedFile;
pub use image_ref::ImageRef;
pub use ingestion::{DragPhase, FileIngestion, IngestionEvent};
pub use renderer::{tiles, ComparisonTile, ComparisonView, Download, TileOverlay};
pub use result_set::{ResultSet, ORIGINAL_KEY};
