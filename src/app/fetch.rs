use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::{
    config::FetchConfig,
    domain::{events::RawEvent, rules::RepoRule},
    ports::ApiClientPort,
};

/// Retrieves the raw, unfiltered events likely to contain matches for one
/// repository. Two independent strategies run per cycle:
///
/// 1. The latest page of issue-level events, unconditionally. The endpoint
///    has no `since` parameter, so overlap with prior cycles is expected and
///    handled downstream by the stale filter and idempotent upsert.
/// 2. When the rule has comment patterns, recent comments plus recently
///    updated issue bodies. Depth depends on watermark staleness: a wide
///    page recovers from downtime, a narrow `since`-bounded page covers
///    steady-state polling.
pub async fn fetch_repo_events<C>(
    api: &C,
    repo: &str,
    rule: &RepoRule,
    last_fetched: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tuning: &FetchConfig,
) -> Result<Vec<RawEvent>>
where
    C: ApiClientPort,
{
    let mut events = Vec::new();

    if rule.wants_comments() {
        let stale_after = Duration::hours(tuning.stale_after_hours as i64);
        let watermark_is_stale = match last_fetched {
            None => true,
            Some(at) => now - at > stale_after,
        };

        let (comments, issues) = if watermark_is_stale {
            (
                api.fetch_recent_comments(repo, None, tuning.wide_comment_page)
                    .await?,
                api.fetch_recent_issues(repo, None, tuning.wide_issue_page)
                    .await?,
            )
        } else {
            (
                api.fetch_recent_comments(repo, last_fetched, tuning.narrow_comment_page)
                    .await?,
                api.fetch_recent_issues(repo, last_fetched, tuning.narrow_issue_page)
                    .await?,
            )
        };
        debug!(
            repo,
            wide = watermark_is_stale,
            comments = comments.len(),
            issue_bodies = issues.len(),
            "fetched comment candidates"
        );
        events.extend(comments);
        events.extend(issues);
    }

    let issue_events = api.fetch_issue_events(repo, tuning.events_page).await?;
    debug!(repo, count = issue_events.len(), "fetched issue events");
    events.extend(issue_events);

    Ok(events)
}
