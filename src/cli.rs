//! CLIモジュール

use crate::client::TogglClient;
use crate::config::{CliArgs, Config};
use crate::goal::parse_goal;
use crate::monitor::{Monitor, MonitorExit};
use crate::notify::SystemNotifier;
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// Ctrl-Cで中断したときの終了コード
const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Goal Tracker - Toggl Trackの今日の作業時間を目標と比較して表示
#[derive(Parser, Debug)]
#[command(name = "goal-tracker", version)]
#[command(about = "今日の作業時間が目標に届くまで進捗を表示します", long_about = None)]
pub struct Cli {
    /// 目標時間（例: 6 = 6時間, 7:30, 3.5 = 3時間30分, 360 = 360分）
    pub goal: String,

    /// ポーリング間隔（秒）
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// 集計対象のワークスペースID（複数指定可）
    #[arg(short = 'w', long = "workspace")]
    pub workspaces: Vec<u64>,

    /// 目標達成時のデスクトップ通知を無効にする
    #[arg(long)]
    pub no_notify: bool,
}

/// CLIエントリポイント
pub fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help と --version は成功扱い、それ以外は終了コード1
            let _ = e.print();
            return Ok(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    let goal = parse_goal(&cli.goal).context("目標時間を解析できません")?;
    let cli_args = CliArgs {
        interval: cli.interval,
        workspaces: cli.workspaces,
        no_notify: cli.no_notify,
    };
    let config = Config::load(&cli_args).context("設定の読み込みに失敗しました")?;

    let client = TogglClient::new(
        &config.api_base_url,
        &config.api_token,
        Duration::from_secs(config.request_timeout_seconds),
    );
    let notifier = SystemNotifier::from_config(config.notify);

    info!("目標: {}（{}分）", goal, goal.minutes());
    let mut monitor = Monitor::new(config, goal, client, notifier, io::stdout());
    monitor.setup_signal_handler()?;

    match monitor.run()? {
        MonitorExit::Reached => Ok(ExitCode::SUCCESS),
        MonitorExit::Interrupted => Ok(ExitCode::from(INTERRUPTED_EXIT_CODE)),
    }
}
