//! デスクトップ通知モジュール

use crate::goal::Goal;
use notify_rust::Notification;
use tracing::warn;

const APP_NAME: &str = "goal-tracker";
const TITLE: &str = "目標達成！";

/// 目標達成の通知先
pub trait Notifier {
    fn goal_reached(&self, goal: &Goal);
}

/// OSの通知機能
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemNotifier {
    /// デスクトップ通知を表示する
    Desktop,
    /// 何もしない
    Silent,
}

impl SystemNotifier {
    /// 設定に応じた通知先を返す
    pub fn from_config(enabled: bool) -> Self {
        if enabled {
            SystemNotifier::Desktop
        } else {
            SystemNotifier::Silent
        }
    }
}

impl Notifier for SystemNotifier {
    /// 通知を表示する
    ///
    /// 失敗しても警告を出すだけで処理は継続する
    fn goal_reached(&self, goal: &Goal) {
        if *self == SystemNotifier::Silent {
            return;
        }

        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(TITLE)
            .body(&notification_body(goal))
            .show()
        {
            warn!("通知の表示に失敗: {}", e);
        }
    }
}

fn notification_body(goal: &Goal) -> String {
    format!("今日の目標 {} を達成しました。お疲れさまでした", goal)
}
