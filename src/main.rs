use bg_compare::{backend, cli, config, error, export, scanner};
use bg_compare_common::renderer::{summary_label, LOADING_LABEL, RESULTS_HEADING};
use bg_compare_common::{tiles, FileIngestion, SubmissionController, WorkflowState};
use backend::HttpBackend;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{BgCompareError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Compare { image, output_dir, no_delay, json } => {
            let mut client_config = config.client_config();
            if no_delay {
                client_config = client_config.with_min_display_delay(Duration::ZERO);
            }
            let backend = HttpBackend::new();

            // 1. 取り込み
            println!("[1/3] 画像を読み込み中...");
            let file = scanner::load_image(&image)?;
            println!("✔ {} ({})\n", file.name(), file.size_label());

            let mut ingestion = FileIngestion::new();
            let mut controller = SubmissionController::new(client_config.clone());
            if let Some(event) = ingestion.pick_files(std::iter::once(file)) {
                controller.handle(event);
            }

            // 2. 送信
            println!("[2/3] 送信先: {}", client_config.remove_bg_url());
            let spinner = spinner(LOADING_LABEL);
            controller.submit(&backend).await;
            spinner.finish_and_clear();

            let result_set = match controller.state() {
                WorkflowState::Succeeded(set) => set.clone(),
                WorkflowState::Failed(message) => {
                    if let Some(detail) = controller.diagnostic() {
                        tracing::debug!(detail, "submission failure detail");
                    }
                    return Err(BgCompareError::Submission(message.clone()));
                }
                other => {
                    return Err(BgCompareError::Submission(format!(
                        "unexpected state: {}",
                        other.as_str()
                    )))
                }
            };

            // 3. 表示・保存
            let tiles = tiles(&result_set);
            if json {
                println!("{}", serde_json::to_string_pretty(&result_set)?);
            } else {
                println!("[3/3] {} ({})", RESULTS_HEADING, summary_label(tiles.len()));
                for tile in &tiles {
                    println!("  - {:<24} → {}", tile.display_name(), tile.download_file_name());
                }
            }

            if let Some(dir) = output_dir {
                let written = export::save_downloads(&tiles, &dir, &client_config, &backend).await?;
                println!("\n✔ {}件を保存: {}", written.len(), dir.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Models => {
            let client_config = config.client_config();
            let models = HttpBackend::new().list_models(&client_config.models_url()).await?;
            println!("モデル一覧 ({}):", models.len());
            for model in models {
                println!("  - {}", model);
            }
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  バックエンドURL: {}",
                    config.api_url().unwrap_or_else(|| "（未設定: 相対パス）".to_string())
                );
                println!("  最小待ち時間: {}ms", config.min_display_delay_ms);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
