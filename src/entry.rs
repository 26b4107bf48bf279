//! タイムエントリモジュール

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Toggl Trackのタイムエントリ
///
/// `duration` が負の場合は計測中で、`start` から現在までを作業時間とみなす。
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntry {
    #[serde(alias = "wid")]
    pub workspace_id: u64,
    pub start: DateTime<Utc>,
    pub duration: i64,
}

impl TimeEntry {
    /// 計測中かどうか
    pub fn is_running(&self) -> bool {
        self.duration < 0
    }
}

/// APIレスポンス
///
/// 配列がそのまま返る場合と、オブジェクトに包まれて返る場合がある
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntriesResponse {
    List(Vec<TimeEntry>),
    Wrapped {
        #[serde(alias = "items")]
        data: Vec<TimeEntry>,
    },
}

impl EntriesResponse {
    pub fn into_entries(self) -> Vec<TimeEntry> {
        match self {
            EntriesResponse::List(entries) => entries,
            EntriesResponse::Wrapped { data } => data,
        }
    }
}
