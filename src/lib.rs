//! bg-compare: 背景除去モデル比較ツール
//!
//! ワークフロー本体は `bg-compare-common` にあり、このクレートは
//! CLI・設定・HTTPバックエンド・ダウンロード保存を提供する。

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod scanner;
