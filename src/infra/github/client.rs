use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

use crate::{config::Config, domain::events::RawEvent, ports::ApiClientPort};

use super::{
    adapt::{comment_to_raw, issue_body_to_raw, issue_event_to_raw},
    models::{ApiComment, ApiIssue, ApiIssueEvent, ApiUser},
};

const USER_AGENT: &str = concat!("gh-radar/", env!("CARGO_PKG_VERSION"));

/// Stateless REST client over a GitHub or GitHub Enterprise API, built from
/// the `{token, root_url}` credential pair. No `Debug` impl: the token must
/// not end up in logs.
#[derive(Clone)]
pub struct RestApiClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
    web_origin: String,
}

impl RestApiClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let token = cfg.github.resolve_token()?;
        Self::new(token, &cfg.github.root_url, cfg.fetch.timeout_seconds)
    }

    pub fn new(token: String, root_url: &str, timeout_seconds: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            token,
            api_url: api_url_from_root(root_url)?,
            web_origin: web_origin_from_root(root_url)?,
        })
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.api_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(query)
            .send()
            .await
            .with_context(|| format!("request failed: GET {url}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: GET {url}"))?;
        if !status.is_success() {
            return Err(anyhow!("GET {url} returned {status}: {}", body.trim()));
        }

        serde_json::from_str(&body).with_context(|| format!("invalid payload: GET {url}"))
    }

    /// Fetches a list endpoint leniently: elements that do not match the
    /// expected shape are dropped instead of failing the whole page.
    async fn get_list<T>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let raw: Vec<serde_json::Value> = self.get_json(path, query).await?;
        Ok(raw
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect())
    }
}

#[async_trait]
impl ApiClientPort for RestApiClient {
    async fn check_auth(&self) -> Result<String> {
        let user: ApiUser = self
            .get_json("user", &[])
            .await
            .context("credential check failed")?;
        if user.login.trim().is_empty() {
            return Err(anyhow!("authenticated login is empty"));
        }
        Ok(user.login)
    }

    async fn fetch_issue_events(&self, repo: &str, per_page: usize) -> Result<Vec<RawEvent>> {
        let events: Vec<ApiIssueEvent> = self
            .get_list(
                &format!("repos/{repo}/issues/events"),
                &[("per_page", per_page.to_string())],
            )
            .await
            .with_context(|| format!("failed to fetch issue events for {repo}"))?;

        Ok(events
            .into_iter()
            .filter_map(|event| issue_event_to_raw(repo, &self.web_origin, event))
            .collect())
    }

    async fn fetch_recent_comments(
        &self,
        repo: &str,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    ) -> Result<Vec<RawEvent>> {
        let mut query = vec![
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(since) = since {
            query.push(("since", iso8601(since)));
        }

        let comments: Vec<ApiComment> = self
            .get_list(&format!("repos/{repo}/issues/comments"), &query)
            .await
            .with_context(|| format!("failed to fetch issue comments for {repo}"))?;

        Ok(comments
            .into_iter()
            .filter_map(|comment| comment_to_raw(repo, comment))
            .collect())
    }

    async fn fetch_recent_issues(
        &self,
        repo: &str,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    ) -> Result<Vec<RawEvent>> {
        let mut query = vec![
            ("state", "open".to_string()),
            ("sort", "updated".to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(since) = since {
            query.push(("since", iso8601(since)));
        }

        let issues: Vec<ApiIssue> = self
            .get_list(&format!("repos/{repo}/issues"), &query)
            .await
            .with_context(|| format!("failed to fetch issues for {repo}"))?;

        Ok(issues
            .into_iter()
            .map(|issue| issue_body_to_raw(repo, issue))
            .collect())
    }
}

fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Origin used for web links. github.com and its API origin both map to the
/// public site; anything else is treated as a GitHub Enterprise origin.
pub fn web_origin_from_root(root_url: &str) -> Result<String> {
    let origin = origin_of(root_url)?;
    if origin == "https://github.com" || origin == "https://api.github.com" {
        return Ok("https://github.com".to_string());
    }
    Ok(origin)
}

/// REST API base: `https://api.github.com` for the public site, the
/// `/api/v3` prefix for GitHub Enterprise.
pub fn api_url_from_root(root_url: &str) -> Result<String> {
    let origin = origin_of(root_url)?;
    if origin == "https://github.com" || origin == "https://api.github.com" {
        return Ok("https://api.github.com".to_string());
    }
    Ok(format!("{origin}/api/v3"))
}

fn origin_of(root_url: &str) -> Result<String> {
    let trimmed = root_url.trim().trim_end_matches('/');
    let (scheme, rest) = trimmed
        .split_once("://")
        .ok_or_else(|| anyhow!("root URL '{root_url}' must include a scheme"))?;
    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() {
        return Err(anyhow!("root URL '{root_url}' has no host"));
    }
    Ok(format!("{scheme}://{host}"))
}
