use std::{collections::BTreeMap, fs, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    domain::rules::RepoRule,
    domain::state::{DismissedEntry, NotificationState, NotifyItem},
    ports::{NotifyStorePort, RuleStorePort},
};

const META_LAST_FETCHED: &str = "last_fetched";

/// Single-file persistence for both stores: repository rules, unread
/// notification items, the dismissed ledger, and the poll watermark.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create state dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite db: {}", path.display()))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        conn.execute_batch(
            "
CREATE TABLE IF NOT EXISTS repo_rules (
  repo TEXT PRIMARY KEY,
  rules_json TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notify_items (
  item_id TEXT PRIMARY KEY,
  repo TEXT NOT NULL,
  payload_json TEXT NOT NULL,
  event_created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notify_items_repo
ON notify_items (repo);

CREATE TABLE IF NOT EXISTS dismissed_ledger (
  item_id TEXT PRIMARY KEY,
  dismissed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS poll_meta (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL
);
",
        )?;
        Ok(())
    }
}

impl RuleStorePort for SqliteStore {
    fn load_rules(&self) -> Result<BTreeMap<String, RepoRule>> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT repo, rules_json FROM repo_rules")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut rules = BTreeMap::new();
        for row in rows {
            let (repo, payload) = row?;
            let rule: RepoRule = serde_json::from_str(&payload)
                .with_context(|| format!("invalid stored rule for {repo}"))?;
            rules.insert(repo, rule);
        }
        Ok(rules)
    }

    fn save_rule(&self, repo: &str, rule: &RepoRule) -> Result<()> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "
INSERT INTO repo_rules (repo, rules_json)
VALUES (?1, ?2)
ON CONFLICT(repo) DO UPDATE SET rules_json = excluded.rules_json
",
            params![repo, serde_json::to_string(rule)?],
        )?;
        Ok(())
    }

    fn remove_rule(&self, repo: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        let removed = conn.execute("DELETE FROM repo_rules WHERE repo = ?1", params![repo])?;
        Ok(removed > 0)
    }
}

impl NotifyStorePort for SqliteStore {
    fn load_state(&self) -> Result<NotificationState> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");

        let last_fetched: Option<String> = conn
            .query_row(
                "SELECT value FROM poll_meta WHERE key = ?1",
                params![META_LAST_FETCHED],
                |row| row.get(0),
            )
            .optional()?;
        let last_fetched = last_fetched
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw).map(|parsed| parsed.with_timezone(&Utc))
            })
            .transpose()
            .context("invalid stored watermark")?;

        let mut stmt =
            conn.prepare("SELECT item_id, dismissed_at FROM dismissed_ledger ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut recently_dismissed = Vec::new();
        for row in rows {
            let (id, dismissed_at) = row?;
            let dismissed_at = DateTime::parse_from_rfc3339(&dismissed_at)
                .with_context(|| format!("invalid dismissal time for {id}"))?
                .with_timezone(&Utc);
            recently_dismissed.push(DismissedEntry { id, dismissed_at });
        }

        let mut stmt = conn.prepare("SELECT repo, payload_json FROM notify_items ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut items_by_repo: BTreeMap<String, Vec<NotifyItem>> = BTreeMap::new();
        for row in rows {
            let (repo, payload) = row?;
            let item: NotifyItem = serde_json::from_str(&payload)
                .with_context(|| format!("invalid stored notification for {repo}"))?;
            items_by_repo.entry(repo).or_default().push(item);
        }

        Ok(NotificationState {
            last_fetched,
            recently_dismissed,
            items_by_repo,
        })
    }

    fn save_state(&self, state: &NotificationState) -> Result<()> {
        let mut conn = self.conn.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM notify_items", [])?;
        tx.execute("DELETE FROM dismissed_ledger", [])?;

        match state.last_fetched {
            Some(at) => {
                tx.execute(
                    "
INSERT INTO poll_meta (key, value)
VALUES (?1, ?2)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
",
                    params![META_LAST_FETCHED, at.to_rfc3339()],
                )?;
            }
            None => {
                tx.execute(
                    "DELETE FROM poll_meta WHERE key = ?1",
                    params![META_LAST_FETCHED],
                )?;
            }
        }

        for (repo, items) in &state.items_by_repo {
            for item in items {
                tx.execute(
                    "
INSERT INTO notify_items (item_id, repo, payload_json, event_created_at)
VALUES (?1, ?2, ?3, ?4)
",
                    params![
                        item.id,
                        repo,
                        serde_json::to_string(item)?,
                        item.created_at.to_rfc3339(),
                    ],
                )?;
            }
        }

        for entry in &state.recently_dismissed {
            tx.execute(
                "
INSERT INTO dismissed_ledger (item_id, dismissed_at)
VALUES (?1, ?2)
",
                params![entry.id, entry.dismissed_at.to_rfc3339()],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
