//! 送信コントローラ
//!
//! 状態遷移: Idle → FileSelected → Submitting → Succeeded / Failed
//!
//! 多重送信は状態で防ぐ（`Submitting` 中は `begin_submit` が何も返さない）。
//! 送信ごとに世代番号を振り、応答時点で世代が変わっていればその応答は捨てる。
//! 状態が変わるたびに購読者へスナップショットを通知する。

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::file::SelectedFile;
use crate::ingestion::IngestionEvent;
use crate::result_set::ResultSet;

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    FileSelected,
    Submitting,
    Succeeded(ResultSet),
    /// ユーザー向けの汎用メッセージ
    Failed(String),
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::FileSelected => "file-selected",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed(_) => "failed",
        }
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            WorkflowState::Succeeded(set) => Some(set),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// 購読者へ渡す状態のコピー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub state: WorkflowState,
    pub file: Option<SelectedFile>,
    pub generation: u64,
}

impl WorkflowSnapshot {
    pub fn can_submit(&self) -> bool {
        can_submit(&self.state, self.file.as_ref())
    }
}

/// 画像処理バックエンド
///
/// 実装は `file` フィールド1つのマルチパートで `url` へPOSTし、
/// 成功時はレスポンス本文をそのまま返す。本文の検証はコントローラが行う。
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn remove_background(&self, url: &str, file: &SelectedFile) -> Result<String>;

    /// 送信前の待機。既定では待たない
    async fn pause(&self, _delay: Duration) {}
}

/// `begin_submit` が返す送信内容
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub generation: u64,
    pub url: String,
    pub file: SelectedFile,
    pub delay: Duration,
}

/// 応答を反映したか、古い応答として捨てたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

type Subscriber = Box<dyn Fn(&WorkflowSnapshot)>;

pub struct SubmissionController {
    config: ClientConfig,
    state: WorkflowState,
    file: Option<SelectedFile>,
    generation: u64,
    diagnostic: Option<String>,
    subscribers: Vec<Subscriber>,
}

impl SubmissionController {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: WorkflowState::Idle,
            file: None,
            generation: 0,
            diagnostic: None,
            subscribers: Vec::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 直近の失敗の詳細（開発者向け。画面には出さない）
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            state: self.state.clone(),
            file: self.file.clone(),
            generation: self.generation,
        }
    }

    /// 購読者を登録する。登録時に現在のスナップショットを1回通知する
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&WorkflowSnapshot) + 'static,
    {
        subscriber(&self.snapshot());
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn can_submit(&self) -> bool {
        can_submit(&self.state, self.file.as_ref())
    }

    /// 取り込み層のイベントを反映する。前回の結果・エラーは必ず消える
    pub fn handle(&mut self, event: IngestionEvent) {
        // 送信中の応答はこの時点で古くなる
        self.generation += 1;
        self.diagnostic = None;
        match event {
            IngestionEvent::FileSelected(file) => {
                self.file = Some(file);
                self.transition(WorkflowState::FileSelected);
            }
            IngestionEvent::Cleared => {
                self.file = None;
                self.transition(WorkflowState::Idle);
            }
        }
    }

    /// 送信を開始する。送信不可の状態なら `None`
    ///
    /// `Failed` からの再送は、保持しているファイルでそのまま `Submitting` へ進む。
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.can_submit() {
            tracing::debug!(state = self.state.as_str(), "submit ignored");
            return None;
        }
        let file = self.file.clone()?;

        self.generation += 1;
        self.diagnostic = None;
        self.transition(WorkflowState::Submitting);

        Some(PendingSubmission {
            generation: self.generation,
            url: self.config.remove_bg_url(),
            file,
            delay: self.config.min_display_delay,
        })
    }

    /// バックエンドの応答を反映する
    pub fn complete(&mut self, generation: u64, outcome: Result<String>) -> Completion {
        if generation != self.generation || self.state != WorkflowState::Submitting {
            tracing::info!(
                generation,
                current = self.generation,
                "discarding stale response"
            );
            return Completion::Stale;
        }

        match outcome.and_then(|body| ResultSet::from_json(&body)) {
            Ok(result_set) => {
                tracing::debug!(models = result_set.model_count(), "submission succeeded");
                self.transition(WorkflowState::Succeeded(result_set));
            }
            Err(err) => self.fail(err),
        }
        Completion::Applied
    }

    /// 送信から応答反映までを一続きで行う
    ///
    /// UIでは `begin_submit` と `complete` を分けて呼び、その間は他のイベントを受け付ける。
    pub async fn submit<B: Backend>(&mut self, backend: &B) -> Option<Completion> {
        let pending = self.begin_submit()?;
        if !pending.delay.is_zero() {
            backend.pause(pending.delay).await;
        }
        let outcome = backend.remove_background(&pending.url, &pending.file).await;
        Some(self.complete(pending.generation, outcome))
    }

    fn fail(&mut self, err: Error) {
        let kind = if err.is_transport() { "transport" } else { "validation" };
        tracing::debug!(kind, error = %err, "submission failed");
        self.diagnostic = Some(err.to_string());
        self.transition(WorkflowState::Failed(err.user_message().to_string()));
    }

    fn transition(&mut self, next: WorkflowState) {
        tracing::debug!(from = self.state.as_str(), to = next.as_str(), "transition");
        self.state = next;
        let snapshot = self.snapshot();
        for subscriber in &self.subscribers {
            subscriber(&snapshot);
        }
    }
}

fn can_submit(state: &WorkflowState, file: Option<&SelectedFile>) -> bool {
    file.is_some() && matches!(state, WorkflowState::FileSelected | WorkflowState::Failed(_))
}
