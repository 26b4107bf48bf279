//! 監視ループモジュール

use crate::client::EntrySource;
use crate::config::Config;
use crate::error::{FetchError, MonitorError};
use crate::goal::Goal;
use crate::notify::Notifier;
use crate::tally::{self, Progress};

use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 待機中に停止フラグを確認する間隔
const WAIT_SLICE: Duration = Duration::from_millis(200);

/// ポーリングの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Reached,
    Fatal,
}

impl PollState {
    fn is_terminal(self) -> bool {
        matches!(self, PollState::Reached | PollState::Fatal)
    }
}

/// ループの終了理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    Reached,
    Interrupted,
}

/// 監視ループ
pub struct Monitor<S, N, W> {
    config: Config,
    goal: Goal,
    source: S,
    notifier: N,
    out: W,
    state: PollState,
    /// 改行していない進捗行が表示中か
    line_open: bool,
    running: Arc<AtomicBool>,
}

impl<S: EntrySource, N: Notifier, W: Write> Monitor<S, N, W> {
    /// 新しいMonitorを作成
    pub fn new(config: Config, goal: Goal, source: S, notifier: N, out: W) -> Self {
        Self {
            config,
            goal,
            source,
            notifier,
            out,
            state: PollState::Idle,
            line_open: false,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// シグナルハンドラーをセットアップ
    pub fn setup_signal_handler(&self) -> Result<(), MonitorError> {
        let running = Arc::clone(&self.running);

        ctrlc::set_handler(move || {
            info!("シャットダウンシグナルを受信しました");
            running.store(false, Ordering::SeqCst);
        })
        .map_err(|e| MonitorError::SignalHandlerError(e.to_string()))?;

        Ok(())
    }

    /// 監視ループを実行
    ///
    /// 目標達成か中断で `Ok`、認証エラーで `Err` を返す
    pub fn run(&mut self) -> Result<MonitorExit, MonitorError> {
        info!(
            "監視を開始します（目標: {}, 間隔: {}秒）",
            self.goal, self.config.interval_seconds
        );

        while self.running.load(Ordering::SeqCst) {
            if self.poll_at(Local::now())? == PollState::Reached {
                return Ok(MonitorExit::Reached);
            }
            self.wait_next_tick();
        }

        self.finish_line()?;
        info!("監視を終了します");
        Ok(MonitorExit::Interrupted)
    }

    /// 1回分のポーリング
    pub fn poll_at(&mut self, now: DateTime<Local>) -> Result<PollState, MonitorError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        self.state = PollState::Polling;

        let entries = match self.source.fetch_today(now) {
            Ok(entries) => entries,
            Err(e) if e.is_fatal() => {
                // メッセージの表示は呼び出し側に任せる
                debug!("致命的なエラーで監視を停止します: {}", e);
                self.state = PollState::Fatal;
                self.finish_line()?;
                return Err(e.into());
            }
            Err(e) => {
                // 一時的なエラーは次の周期で再試行
                // ログが進捗行の後ろに続かないよう先に改行する
                self.finish_line()?;
                warn!("タイムエントリの取得に失敗: {}", e);
                self.state = PollState::Idle;
                return Ok(self.state);
            }
        };

        let total = tally::compute_total(
            &entries,
            &self.config.workspace_ids,
            now.with_timezone(&Utc),
        );

        match Progress::evaluate(total, &self.goal) {
            Progress::Reached { total_seconds } => {
                info!("目標を達成しました: {}秒", total_seconds);
                self.report_reached(total_seconds)?;
                self.notifier.goal_reached(&self.goal);
                self.state = PollState::Reached;
            }
            Progress::Ongoing {
                total_seconds,
                remaining_seconds,
                percent,
            } => {
                debug!("合計 {}秒 / 目標 {}秒", total_seconds, self.goal.seconds());
                self.redraw(now, remaining_seconds, percent)?;
                self.state = PollState::Idle;
            }
        }

        Ok(self.state)
    }

    fn redraw(
        &mut self,
        now: DateTime<Local>,
        remaining_seconds: u64,
        percent: f64,
    ) -> io::Result<()> {
        write!(
            self.out,
            "{}{}",
            tally::title_sequence(remaining_seconds, percent, self.config.short_bar_width),
            tally::status_line(now, remaining_seconds, percent, self.config.long_bar_width)
        )?;
        self.out.flush()?;
        self.line_open = true;
        Ok(())
    }

    fn report_reached(&mut self, total_seconds: u64) -> io::Result<()> {
        writeln!(
            self.out,
            "{}{}{}",
            tally::reached_title(&self.goal),
            tally::CLEAR_LINE,
            tally::reached_summary(total_seconds, &self.goal)
        )?;
        self.out.flush()?;
        self.line_open = false;
        Ok(())
    }

    /// 上書き中の進捗行を改行で確定させる
    fn finish_line(&mut self) -> io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.out.flush()?;
            self.line_open = false;
        }
        Ok(())
    }

    /// 次の周期まで待つ（停止フラグが下りたら即座に戻る）
    fn wait_next_tick(&self) {
        let deadline = Instant::now() + Duration::from_secs(self.config.interval_seconds);
        while self.running.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(WAIT_SLICE.min(deadline - now));
        }
    }
}
