//! 目標時間モジュール

use crate::error::GoalParseError;
use std::fmt;

/// 1日の目標作業時間（分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    minutes: u32,
}

impl Goal {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u64 {
        u64::from(self.minutes) * 60
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// 目標時間の文字列を解析する
///
/// 受け付ける形式:
/// - `H:MM` 形式（例: `7:25`）。片方が欠けている・数値でない場合は0として扱う
/// - 小数の時間（例: `3.5` は210分）。分単位に四捨五入
/// - 整数。60以上なら分、60未満なら時間として扱う
///
/// 最後の規則により `6` は6時間だが `360` は360分になる。
/// 紛らわしいが既存の利用者がこの挙動に依存しているため変えない。
pub fn parse_goal(input: &str) -> Result<Goal, GoalParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GoalParseError::Empty);
    }

    let invalid = || GoalParseError::InvalidFormat(input.to_string());

    if let Some((hours, minutes)) = input.split_once(':') {
        let hours: u32 = hours.trim().parse().unwrap_or(0);
        let minutes: u32 = minutes.trim().parse().unwrap_or(0);
        let total = hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .ok_or_else(invalid)?;
        return Ok(Goal::from_minutes(total));
    }

    if input.contains('.') {
        let hours: f64 = input.parse().map_err(|_| invalid())?;
        let minutes = (hours * 60.0).round();
        if !minutes.is_finite() || minutes < 0.0 || minutes > f64::from(u32::MAX) {
            return Err(invalid());
        }
        return Ok(Goal::from_minutes(minutes as u32));
    }

    let value: u32 = input.parse().map_err(|_| invalid())?;
    if value >= 60 {
        Ok(Goal::from_minutes(value))
    } else {
        Ok(Goal::from_minutes(value * 60))
    }
}
