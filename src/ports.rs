use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    events::RawEvent,
    rules::RepoRule,
    state::{NotificationState, NotifyItem},
};

/// Stateless request surface of the upstream REST API. Implementations
/// return domain events; response-shape adaptation happens behind this seam.
#[async_trait]
pub trait ApiClientPort: Send + Sync {
    /// Verifies the credential and returns the authenticated login.
    async fn check_auth(&self) -> Result<String>;

    /// Latest issue-level events for the repository. The endpoint has no
    /// `since` parameter; callers must deduplicate and stale-filter.
    async fn fetch_issue_events(&self, repo: &str, per_page: usize) -> Result<Vec<RawEvent>>;

    /// Recent issue comments, optionally bounded by `since`.
    async fn fetch_recent_comments(
        &self,
        repo: &str,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    ) -> Result<Vec<RawEvent>>;

    /// Recently updated issues, each surfaced as a pseudo-comment carrying
    /// the issue body.
    async fn fetch_recent_issues(
        &self,
        repo: &str,
        since: Option<DateTime<Utc>>,
        per_page: usize,
    ) -> Result<Vec<RawEvent>>;
}

pub trait RuleStorePort: Send + Sync {
    fn load_rules(&self) -> Result<BTreeMap<String, RepoRule>>;
    fn save_rule(&self, repo: &str, rule: &RepoRule) -> Result<()>;
    fn remove_rule(&self, repo: &str) -> Result<bool>;
}

pub trait NotifyStorePort: Send + Sync {
    fn load_state(&self) -> Result<NotificationState>;
    /// Persists the whole aggregate atomically; the watermark and the items
    /// it covers must never be written separately.
    fn save_state(&self, state: &NotificationState) -> Result<()>;
}

/// Presentation side effects. All methods are fire-and-forget from the
/// engine's point of view: failures are logged, never propagated.
pub trait NotifierPort: Send + Sync {
    fn check_health(&self) -> Result<()>;
    fn render_badge_count(&self, unread: usize) -> Result<()>;
    fn show_notification(&self, item: &NotifyItem) -> Result<()>;
    fn play_sound(&self) -> Result<()>;
}

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
