use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use gh_radar::app::fetch::fetch_repo_events;
use gh_radar::config::FetchConfig;
use gh_radar::domain::events::RawEvent;
use gh_radar::domain::rules::RepoRule;
use gh_radar::ports::ApiClientPort;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Events {
        repo: String,
        per_page: usize,
    },
    Comments {
        repo: String,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    },
    Issues {
        repo: String,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    },
}

#[derive(Clone, Default)]
struct RecordingApi {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClientPort for RecordingApi {
    async fn check_auth(&self) -> Result<String> {
        Ok("tester".to_string())
    }

    async fn fetch_issue_events(&self, repo: &str, per_page: usize) -> Result<Vec<RawEvent>> {
        self.calls.lock().unwrap().push(Call::Events {
            repo: repo.to_string(),
            per_page,
        });
        Ok(Vec::new())
    }

    async fn fetch_recent_comments(
        &self,
        repo: &str,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    ) -> Result<Vec<RawEvent>> {
        self.calls.lock().unwrap().push(Call::Comments {
            repo: repo.to_string(),
            since,
            per_page,
        });
        Ok(Vec::new())
    }

    async fn fetch_recent_issues(
        &self,
        repo: &str,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    ) -> Result<Vec<RawEvent>> {
        self.calls.lock().unwrap().push(Call::Issues {
            repo: repo.to_string(),
            since,
            per_page,
        });
        Ok(Vec::new())
    }
}

fn comment_rule() -> RepoRule {
    RepoRule {
        comment_patterns: vec!["urgent".to_string()],
        ..RepoRule::default()
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 20, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn rule_without_patterns_only_fetches_issue_events() {
    let api = RecordingApi::default();
    let rule = RepoRule {
        labeled: vec!["bug".to_string()],
        ..RepoRule::default()
    };

    fetch_repo_events(&api, "acme/api", &rule, None, now(), &FetchConfig::default())
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![Call::Events {
            repo: "acme/api".to_string(),
            per_page: 40,
        }]
    );
}

#[tokio::test]
async fn missing_watermark_uses_wide_pages() {
    let api = RecordingApi::default();

    fetch_repo_events(
        &api,
        "acme/api",
        &comment_rule(),
        None,
        now(),
        &FetchConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            Call::Comments {
                repo: "acme/api".to_string(),
                since: None,
                per_page: 60,
            },
            Call::Issues {
                repo: "acme/api".to_string(),
                since: None,
                per_page: 20,
            },
            Call::Events {
                repo: "acme/api".to_string(),
                per_page: 40,
            },
        ]
    );
}

#[tokio::test]
async fn stale_watermark_uses_wide_pages() {
    let api = RecordingApi::default();
    let watermark = now() - Duration::hours(3);

    fetch_repo_events(
        &api,
        "acme/api",
        &comment_rule(),
        Some(watermark),
        now(),
        &FetchConfig::default(),
    )
    .await
    .unwrap();

    assert!(matches!(
        api.calls()[0],
        Call::Comments {
            since: None,
            per_page: 60,
            ..
        }
    ));
}

#[tokio::test]
async fn fresh_watermark_uses_narrow_since_bounded_pages() {
    let api = RecordingApi::default();
    let watermark = now() - Duration::hours(1);

    fetch_repo_events(
        &api,
        "acme/api",
        &comment_rule(),
        Some(watermark),
        now(),
        &FetchConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            Call::Comments {
                repo: "acme/api".to_string(),
                since: Some(watermark),
                per_page: 30,
            },
            Call::Issues {
                repo: "acme/api".to_string(),
                since: Some(watermark),
                per_page: 10,
            },
            Call::Events {
                repo: "acme/api".to_string(),
                per_page: 40,
            },
        ]
    );
}
