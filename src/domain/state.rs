use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::events::EventKind;

/// How long a dismissed id keeps suppressing re-notification. Covers the
/// overlap window of the non-incremental issue events endpoint.
pub const DISMISS_SUPPRESSION_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub number: i64,
    pub title: String,
}

/// A durable, user-facing notification awaiting acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyItem {
    pub id: String,
    pub event_type: EventKind,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub repo_name: String,
    pub link: String,
    pub issue: IssueRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissedEntry {
    pub id: String,
    pub dismissed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
    Suppressed,
}

/// The persisted notification aggregate: unread items per repository, the
/// recently-dismissed ledger, and the poll watermark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationState {
    pub last_fetched: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recently_dismissed: Vec<DismissedEntry>,
    #[serde(default)]
    pub items_by_repo: BTreeMap<String, Vec<NotifyItem>>,
}

impl NotificationState {
    /// Idempotent upsert keyed on item id. Re-saving an existing id replaces
    /// the stored item in place; ids dismissed within the suppression window
    /// are not re-added.
    pub fn upsert_item(&mut self, item: NotifyItem, now: DateTime<Utc>) -> UpsertOutcome {
        if self.is_recently_dismissed(&item.id, now) {
            return UpsertOutcome::Suppressed;
        }

        let items = self.items_by_repo.entry(item.repo_name.clone()).or_default();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                UpsertOutcome::Replaced
            }
            None => {
                items.push(item);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Removes one item and records the dismissal in the ledger. Returns
    /// false when no item with that id exists for the repository.
    pub fn dismiss_item(&mut self, repo: &str, id: &str, now: DateTime<Utc>) -> bool {
        let Some(items) = self.items_by_repo.get_mut(repo) else {
            return false;
        };
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return false;
        }
        if items.is_empty() {
            self.items_by_repo.remove(repo);
        }

        self.recently_dismissed.retain(|entry| entry.id != id);
        self.recently_dismissed.push(DismissedEntry {
            id: id.to_string(),
            dismissed_at: now,
        });
        true
    }

    pub fn dismiss_all(&mut self, now: DateTime<Utc>) -> usize {
        let ids = self
            .items_by_repo
            .iter()
            .flat_map(|(repo, items)| {
                items
                    .iter()
                    .map(|item| (repo.clone(), item.id.clone()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let mut dismissed = 0;
        for (repo, id) in ids {
            if self.dismiss_item(&repo, &id, now) {
                dismissed += 1;
            }
        }
        dismissed
    }

    pub fn is_recently_dismissed(&self, id: &str, now: DateTime<Utc>) -> bool {
        let cutoff = now - Duration::hours(DISMISS_SUPPRESSION_HOURS);
        self.recently_dismissed
            .iter()
            .any(|entry| entry.id == id && entry.dismissed_at > cutoff)
    }

    /// Drops ledger entries older than the suppression window.
    pub fn prune_dismissed(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::hours(DISMISS_SUPPRESSION_HOURS);
        self.recently_dismissed
            .retain(|entry| entry.dismissed_at > cutoff);
    }

    pub fn unread_count(&self) -> usize {
        self.items_by_repo.values().map(Vec::len).sum()
    }

    pub fn all_items(&self) -> impl Iterator<Item = &NotifyItem> {
        self.items_by_repo.values().flatten()
    }

    pub fn find_item(&self, id: &str) -> Option<&NotifyItem> {
        self.all_items().find(|item| item.id == id)
    }

    /// True when any stored item is newer than the given watermark. Drives
    /// the sound/desktop side-effect gate: items already known from a prior
    /// cycle do not re-fire it.
    pub fn has_updates_since(&self, watermark: Option<DateTime<Utc>>) -> bool {
        match watermark {
            Some(at) => self.all_items().any(|item| item.created_at > at),
            None => self.unread_count() > 0,
        }
    }

    /// Moves the watermark forward. A value at or behind the current
    /// watermark is ignored so the watermark never regresses.
    pub fn advance_watermark(&mut self, at: DateTime<Utc>) -> bool {
        match self.last_fetched {
            Some(current) if at <= current => false,
            _ => {
                self.last_fetched = Some(at);
                true
            }
        }
    }
}
