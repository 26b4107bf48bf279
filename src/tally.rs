//! 集計・表示モジュール

use crate::entry::TimeEntry;
use crate::goal::Goal;
use chrono::{DateTime, Local, Utc};
use std::collections::BTreeSet;

const FILLED_CELL: char = '█';
const EMPTY_CELL: char = '░';

/// 行頭に戻って行全体を消す
pub const CLEAR_LINE: &str = "\r\x1b[2K";

/// 今日の合計作業時間（秒）を計算
///
/// `workspace_filter` が空でなければ、含まれるワークスペースのエントリだけを数える。
/// 重複するエントリもそのまま合算する。
pub fn compute_total(
    entries: &[TimeEntry],
    workspace_filter: &BTreeSet<u64>,
    now: DateTime<Utc>,
) -> u64 {
    entries
        .iter()
        .filter(|e| workspace_filter.is_empty() || workspace_filter.contains(&e.workspace_id))
        .map(|e| {
            if e.is_running() {
                // 開始時刻が未来なら0
                (now - e.start).num_seconds().max(0) as u64
            } else {
                e.duration as u64
            }
        })
        .sum()
}

/// 目標に対する進捗
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    Reached {
        total_seconds: u64,
    },
    Ongoing {
        total_seconds: u64,
        remaining_seconds: u64,
        percent: f64,
    },
}

impl Progress {
    /// 合計時間を目標と比較する（目標ちょうどで達成）
    pub fn evaluate(total_seconds: u64, goal: &Goal) -> Self {
        let goal_seconds = goal.seconds();
        if total_seconds >= goal_seconds {
            return Progress::Reached { total_seconds };
        }

        let remaining_seconds = goal_seconds.saturating_sub(total_seconds);
        let percent = (100.0 * total_seconds as f64 / goal_seconds as f64).min(100.0);
        Progress::Ongoing {
            total_seconds,
            remaining_seconds,
            percent,
        }
    }
}

/// 進捗バーを生成
pub fn progress_bar(percent: f64, cells: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * cells as f64).floor() as usize).min(cells);

    let mut bar = String::with_capacity(cells * FILLED_CELL.len_utf8());
    bar.extend(std::iter::repeat(FILLED_CELL).take(filled));
    bar.extend(std::iter::repeat(EMPTY_CELL).take(cells - filled));
    bar
}

/// 秒を `H:MM` 形式にフォーマット（分未満は切り上げ）
pub fn format_hm(seconds: u64) -> String {
    let minutes = seconds.div_ceil(60);
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// 秒を「○時間○分」形式にフォーマット
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}時間{}分", hours, minutes)
    } else {
        format!("{}分", minutes)
    }
}

/// 行を上書きする進捗ステータス（改行なし）
///
/// 前回の行の方が長い場合に備えて、書く前に行を消す
pub fn status_line(
    now: DateTime<Local>,
    remaining_seconds: u64,
    percent: f64,
    bar_cells: usize,
) -> String {
    format!(
        "{}{} 残り {} {} {:.1}%",
        CLEAR_LINE,
        now.format("%H:%M:%S"),
        format_hm(remaining_seconds),
        progress_bar(percent, bar_cells),
        percent
    )
}

/// ターミナルのタイトルを更新するOSCシーケンス
pub fn title_sequence(remaining_seconds: u64, percent: f64, bar_cells: usize) -> String {
    format!(
        "\x1b]0;{} {}\x07",
        format_hm(remaining_seconds),
        progress_bar(percent, bar_cells)
    )
}

/// 目標達成後のタイトル
pub fn reached_title(goal: &Goal) -> String {
    format!("\x1b]0;目標達成 {}\x07", goal)
}

/// 目標達成時のサマリー
pub fn reached_summary(total_seconds: u64, goal: &Goal) -> String {
    format!(
        "目標達成！ 今日の作業時間: {}（目標 {}）",
        format_duration(total_seconds),
        goal
    )
}
