use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bg-compare")]
#[command(about = "背景除去モデルの結果を並べて比較するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して各モデルの結果を比較
    Compare {
        /// 入力画像のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 各モデルの結果を `{モデル名}_result.png` として保存するフォルダ
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 送信前の待ち時間を入れない
        #[arg(long)]
        no_delay: bool,

        /// 結果セットをJSONで標準出力へ
        #[arg(long)]
        json: bool,
    },

    /// バックエンドが提供するモデル一覧
    Models,

    /// 設定管理
    Config {
        /// バックエンドのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
