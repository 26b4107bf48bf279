//! 設定モジュール

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// APIトークンの環境変数
pub const TOKEN_ENV: &str = "TOGGL_API_TOKEN";
/// ワークスペースIDの環境変数（カンマ区切り）
pub const WORKSPACES_ENV: &str = "TOGGL_WORKSPACE_IDS";

const DEFAULT_API_BASE_URL: &str = "https://api.track.toggl.com/api/v9";

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    /// ポーリング間隔（秒）
    pub interval_seconds: u64,
    /// Toggl APIトークン
    pub api_token: String,
    /// 集計対象のワークスペース（空なら全て）
    pub workspace_ids: BTreeSet<u64>,
    /// APIのベースURL
    pub api_base_url: String,
    /// リクエストのタイムアウト（秒）
    pub request_timeout_seconds: u64,
    /// 目標達成時にデスクトップ通知を出すか
    pub notify: bool,
    /// ステータス行の進捗バーの長さ
    pub long_bar_width: usize,
    /// タイトルの進捗バーの長さ
    pub short_bar_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
            api_token: String::new(),
            workspace_ids: BTreeSet::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: 30,
            notify: true,
            long_bar_width: 60,
            short_bar_width: 10,
        }
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    interval_seconds: Option<u64>,
    workspace_ids: Option<Vec<u64>>,
    api_base_url: Option<String>,
    request_timeout_seconds: Option<u64>,
    notify: Option<bool>,
    long_bar_width: Option<usize>,
    short_bar_width: Option<usize>,
}

/// 環境変数から読む値
#[derive(Debug, Default)]
struct EnvConfig {
    api_token: Option<String>,
    workspace_ids: Option<String>,
}

impl EnvConfig {
    fn from_env() -> Self {
        Self {
            api_token: env::var(TOKEN_ENV).ok(),
            workspace_ids: env::var(WORKSPACES_ENV).ok(),
        }
    }
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    pub interval: Option<u64>,
    pub workspaces: Vec<u64>,
    pub no_notify: bool,
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 環境変数 > 設定ファイル > デフォルト値
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let file_config = read_file_config(&config_file_path())?;
        Self::from_sources(file_config, EnvConfig::from_env(), cli_args)
    }

    fn from_sources(
        file_config: FileConfig,
        env_config: EnvConfig,
        cli_args: &CliArgs,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.merge_file_config(file_config);
        config.merge_env_config(env_config)?;
        config.merge_cli_args(cli_args);
        config.validate()?;
        Ok(config)
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: FileConfig) {
        if let Some(interval) = file_config.interval_seconds {
            self.interval_seconds = interval;
        }
        if let Some(ids) = file_config.workspace_ids {
            self.workspace_ids = ids.into_iter().collect();
        }
        if let Some(url) = file_config.api_base_url {
            self.api_base_url = url;
        }
        if let Some(timeout) = file_config.request_timeout_seconds {
            self.request_timeout_seconds = timeout;
        }
        if let Some(notify) = file_config.notify {
            self.notify = notify;
        }
        if let Some(width) = file_config.long_bar_width {
            self.long_bar_width = width;
        }
        if let Some(width) = file_config.short_bar_width {
            self.short_bar_width = width;
        }
    }

    /// 環境変数をマージ
    fn merge_env_config(&mut self, env_config: EnvConfig) -> Result<(), ConfigError> {
        let token = env_config
            .api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingCredential(TOKEN_ENV))?;
        self.api_token = token;

        if let Some(raw) = env_config.workspace_ids {
            let ids = parse_workspace_ids(&raw)?;
            if !ids.is_empty() {
                self.workspace_ids = ids;
            }
        }
        Ok(())
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if let Some(interval) = cli_args.interval {
            self.interval_seconds = interval;
        }
        if !cli_args.workspaces.is_empty() {
            self.workspace_ids = cli_args.workspaces.iter().copied().collect();
        }
        if cli_args.no_notify {
            self.notify = false;
        }
    }

    /// 設定値をバリデート
    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "interval_seconds must be greater than 0",
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout_seconds must be greater than 0",
            ));
        }
        if self.long_bar_width == 0 || self.short_bar_width == 0 {
            return Err(ConfigError::InvalidValue(
                "bar widths must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// 設定ファイルのパスを取得
fn config_file_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".goal-tracker").join("config.toml")
}

/// 設定ファイルを読む（存在しなければデフォルト）
fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// カンマ区切りのワークスペースIDを解析
fn parse_workspace_ids(raw: &str) -> Result<BTreeSet<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| ConfigError::InvalidWorkspaceId(s.to_string()))
        })
        .collect()
}
