use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::Deserialize;

/// Floor on the poll interval, protecting the upstream per-hour rate limit.
pub const MIN_INTERVAL_MINUTES: u64 = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    pub state_db_path: Option<String>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub token: Option<String>,
    #[serde(default = "default_root_url")]
    pub root_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            root_url: default_root_url(),
        }
    }
}

impl GithubConfig {
    /// Environment wins over the config file so the token can stay out of
    /// dotfiles entirely.
    pub fn resolve_token(&self) -> Result<String> {
        env::var("GH_RADAR_TOKEN")
            .or_else(|_| env::var("GITHUB_TOKEN"))
            .ok()
            .or_else(|| self.token.clone())
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "not configured: set github.token in the config file, \
                     or export GH_RADAR_TOKEN / GITHUB_TOKEN"
                )
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub show_desktop: bool,
    #[serde(default)]
    pub play_sound: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            show_desktop: true,
            play_sound: false,
        }
    }
}

/// Fetch-depth tuning. The wide page recovers from extended downtime without
/// paging indefinitely; the narrow page suffices for steady-state polling.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_stale_after_hours")]
    pub stale_after_hours: u64,
    #[serde(default = "default_wide_comment_page")]
    pub wide_comment_page: usize,
    #[serde(default = "default_wide_issue_page")]
    pub wide_issue_page: usize,
    #[serde(default = "default_narrow_comment_page")]
    pub narrow_comment_page: usize,
    #[serde(default = "default_narrow_issue_page")]
    pub narrow_issue_page: usize,
    #[serde(default = "default_events_page")]
    pub events_page: usize,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            stale_after_hours: default_stale_after_hours(),
            wide_comment_page: default_wide_comment_page(),
            wide_issue_page: default_wide_issue_page(),
            narrow_comment_page: default_narrow_comment_page(),
            narrow_issue_page: default_narrow_issue_page(),
            events_page: default_events_page(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_interval_minutes() -> u64 {
    5
}

fn default_root_url() -> String {
    "https://github.com".to_string()
}

fn default_stale_after_hours() -> u64 {
    2
}

fn default_wide_comment_page() -> usize {
    60
}

fn default_wide_issue_page() -> usize {
    20
}

fn default_narrow_comment_page() -> usize {
    30
}

fn default_narrow_issue_page() -> usize {
    10
}

fn default_events_page() -> usize {
    40
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

pub fn parse_config(src: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(src).context("failed to parse config TOML")?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = resolve_config_path(path)?;
    let src = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    parse_config(&src)
}

pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = path {
        return Ok(explicit.to_path_buf());
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return Ok(local);
    }

    if let Some(raw) = env::var_os("GH_RADAR_CONFIG") {
        return Ok(PathBuf::from(raw));
    }

    default_config_path()
}

pub fn default_config_path() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var_os("APPDATA").ok_or_else(|| anyhow!("APPDATA is not set"))?;
        return Ok(PathBuf::from(appdata).join("gh-radar").join("config.toml"));
    }

    #[cfg(not(windows))]
    {
        let home = home_dir()?;
        Ok(home.join(".config").join("gh-radar").join("config.toml"))
    }
}

pub fn default_state_db_path() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let local_appdata =
            env::var_os("LOCALAPPDATA").ok_or_else(|| anyhow!("LOCALAPPDATA is not set"))?;
        return Ok(PathBuf::from(local_appdata)
            .join("gh-radar")
            .join("state.db"));
    }

    #[cfg(not(windows))]
    {
        let home = home_dir()?;
        Ok(home
            .join(".local")
            .join("share")
            .join("gh-radar")
            .join("state.db"))
    }
}

fn home_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| anyhow!("could not determine home directory"))
}

fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.interval_minutes < MIN_INTERVAL_MINUTES {
        return Err(anyhow!(
            "interval_minutes must be >= {MIN_INTERVAL_MINUTES} to respect API rate limits"
        ));
    }

    if cfg.github.root_url.trim().is_empty() {
        return Err(anyhow!("github.root_url must not be empty"));
    }

    let fetch = &cfg.fetch;
    for (name, value) in [
        ("fetch.wide_comment_page", fetch.wide_comment_page),
        ("fetch.wide_issue_page", fetch.wide_issue_page),
        ("fetch.narrow_comment_page", fetch.narrow_comment_page),
        ("fetch.narrow_issue_page", fetch.narrow_issue_page),
        ("fetch.events_page", fetch.events_page),
    ] {
        if value == 0 {
            return Err(anyhow!("{name} must be >= 1"));
        }
    }

    if fetch.timeout_seconds == 0 {
        return Err(anyhow!("fetch.timeout_seconds must be >= 1"));
    }

    Ok(())
}
