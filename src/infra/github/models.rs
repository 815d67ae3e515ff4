use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiIssueRef {
    pub number: i64,
    pub title: String,
}

/// One record from `GET /repos/{owner}/{repo}/issues/events`. Only the
/// `labeled` and `mentioned` event types are adapted; everything else is
/// skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIssueEvent {
    pub id: i64,
    pub event: String,
    pub actor: Option<ApiUser>,
    pub label: Option<ApiLabel>,
    pub issue: Option<ApiIssueRef>,
    pub created_at: DateTime<Utc>,
}

/// One record from `GET /repos/{owner}/{repo}/issues/comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiComment {
    pub id: i64,
    pub body: Option<String>,
    pub html_url: String,
    pub user: Option<ApiUser>,
    pub updated_at: DateTime<Utc>,
}

/// One record from `GET /repos/{owner}/{repo}/issues`; the body doubles as a
/// pseudo-comment so phrases in the description are matchable.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIssue {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub user: Option<ApiUser>,
    pub updated_at: DateTime<Utc>,
}
