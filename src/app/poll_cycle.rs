use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    app::fetch::fetch_repo_events,
    config::Config,
    domain::{
        matcher::{is_stale, match_event},
        state::{NotifyItem, UpsertOutcome},
    },
    ports::{ApiClientPort, ClockPort, NotifierPort, NotifyStorePort, RuleStorePort},
};

#[derive(Debug, Clone, Serialize)]
pub struct RepoFetchFailure {
    pub repo: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PollOutcome {
    pub new_item_ids: Vec<String>,
    pub replaced_items: usize,
    pub suppressed_items: usize,
    pub stale_events: usize,
    pub unread_count: usize,
    pub has_updates: bool,
    pub fetch_failures: Vec<RepoFetchFailure>,
}

/// Runs one full poll cycle: fetch, classify, merge, side effects, watermark.
///
/// Per-repository fetch errors are collected into the outcome and never abort
/// the cycle; the watermark still advances so a failing repository simply
/// retries from its next scheduled cycle. Only state-store failures are
/// returned as errors, since losing dedup state is worse than a skipped
/// cycle.
pub async fn poll_cycle<C, R, S, N, K>(
    cfg: &Config,
    api: &C,
    rules: &R,
    store: &S,
    notifier: &N,
    clock: &K,
) -> Result<PollOutcome>
where
    C: ApiClientPort,
    R: RuleStorePort,
    S: NotifyStorePort,
    N: NotifierPort,
    K: ClockPort,
{
    let cycle_started_at = clock.now();

    let mut state = store
        .load_state()
        .context("failed to load notification state")?;
    let previous_watermark = state.last_fetched;
    let rules_by_repo = rules.load_rules().context("failed to load repository rules")?;

    state.prune_dismissed(cycle_started_at);

    let mut outcome = PollOutcome::default();
    let mut fresh_items: Vec<NotifyItem> = Vec::new();

    for (repo, rule) in &rules_by_repo {
        let events = match fetch_repo_events(
            api,
            repo,
            rule,
            previous_watermark,
            cycle_started_at,
            &cfg.fetch,
        )
        .await
        {
            Ok(events) => events,
            Err(err) => {
                warn!(repo, error = %err, "repository fetch failed; skipped until next cycle");
                outcome.fetch_failures.push(RepoFetchFailure {
                    repo: repo.clone(),
                    message: format!("{err:#}"),
                });
                continue;
            }
        };

        for event in events {
            if is_stale(&event, previous_watermark) {
                outcome.stale_events += 1;
                continue;
            }
            let Some(item) = match_event(&event, rule) else {
                continue;
            };
            match state.upsert_item(item.clone(), cycle_started_at) {
                UpsertOutcome::Inserted => {
                    outcome.new_item_ids.push(item.id.clone());
                    fresh_items.push(item);
                }
                UpsertOutcome::Replaced => outcome.replaced_items += 1,
                UpsertOutcome::Suppressed => outcome.suppressed_items += 1,
            }
        }
    }

    outcome.unread_count = state.unread_count();
    outcome.has_updates = state.has_updates_since(previous_watermark);

    if let Err(err) = notifier.render_badge_count(outcome.unread_count) {
        warn!(error = %err, "badge update failed");
    }
    if outcome.unread_count > 0 && outcome.has_updates {
        if cfg.notifications.play_sound {
            if let Err(err) = notifier.play_sound() {
                warn!(error = %err, "notification sound failed");
            }
        }
        if cfg.notifications.show_desktop {
            for item in &fresh_items {
                if let Err(err) = notifier.show_notification(item) {
                    warn!(item = %item.id, error = %err, "desktop notification failed");
                }
            }
        }
    }

    state.advance_watermark(cycle_started_at);
    store
        .save_state(&state)
        .context("failed to persist notification state")?;

    info!(
        new = outcome.new_item_ids.len(),
        unread = outcome.unread_count,
        failed_repos = outcome.fetch_failures.len(),
        "poll cycle complete"
    );
    Ok(outcome)
}
