//! Goal Tracker - 今日の作業時間を目標と比較して表示するツール

mod cli;
mod client;
mod config;
mod entry;
mod error;
mod goal;
mod logging;
mod monitor;
mod notify;
mod tally;

use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("エラー: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
