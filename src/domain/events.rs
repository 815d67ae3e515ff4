use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Labeled,
    Mentioned,
    CustomCommented,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Labeled => "labeled",
            Self::Mentioned => "mentioned",
            Self::CustomCommented => "custom_commented",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occurrence fetched from the API, before rule matching.
///
/// Built by the adapter functions in `infra::github::adapt`, consumed within
/// a single poll cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    Labeled {
        event_id: i64,
        repo: String,
        actor: Option<String>,
        label: String,
        issue_number: i64,
        issue_title: String,
        link: String,
        created_at: DateTime<Utc>,
    },
    Mentioned {
        event_id: i64,
        repo: String,
        actor: String,
        issue_number: i64,
        issue_title: String,
        link: String,
        created_at: DateTime<Utc>,
    },
    /// A real issue comment, or an issue body treated as a pseudo-comment so
    /// a matching phrase in the description is caught too.
    Commented {
        comment_id: i64,
        repo: String,
        author: String,
        body: String,
        issue_number: i64,
        issue_title: String,
        link: String,
        updated_at: DateTime<Utc>,
    },
}

impl RawEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Labeled { .. } => EventKind::Labeled,
            Self::Mentioned { .. } => EventKind::Mentioned,
            Self::Commented { .. } => EventKind::CustomCommented,
        }
    }

    pub fn repo(&self) -> &str {
        match self {
            Self::Labeled { repo, .. } => repo,
            Self::Mentioned { repo, .. } => repo,
            Self::Commented { repo, .. } => repo,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Labeled { created_at, .. } => *created_at,
            Self::Mentioned { created_at, .. } => *created_at,
            Self::Commented { updated_at, .. } => *updated_at,
        }
    }

    /// Stable notification id, namespaced by source so ids from the issue
    /// events endpoint cannot collide with comment ids.
    pub fn notify_id(&self) -> String {
        match self {
            Self::Labeled { event_id, .. } | Self::Mentioned { event_id, .. } => {
                format!("issueevent-{event_id}")
            }
            Self::Commented { comment_id, .. } => format!("issuecomment-{comment_id}"),
        }
    }
}
