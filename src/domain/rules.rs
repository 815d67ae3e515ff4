use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Matches any non-empty comment body when present in `comment_patterns`.
pub const MATCH_ANY_COMMENT: &str = "*";

/// Per-repository matching rules. Entry order is significant: the first
/// matching entry wins and is the one reported in the notification reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRule {
    #[serde(default)]
    pub labeled: Vec<String>,
    #[serde(default)]
    pub mentioned: Vec<String>,
    #[serde(default)]
    pub comment_patterns: Vec<String>,
}

impl RepoRule {
    pub fn is_empty(&self) -> bool {
        self.labeled.is_empty() && self.mentioned.is_empty() && self.comment_patterns.is_empty()
    }

    pub fn wants_comments(&self) -> bool {
        !self.comment_patterns.is_empty()
    }
}

/// Validates an `owner/repo` key: exactly one slash, both halves non-empty.
pub fn parse_repo_key(key: &str) -> Result<(&str, &str)> {
    let mut parts = key.split('/');
    let owner = parts.next().unwrap_or("");
    let name = parts.next().unwrap_or("");

    if owner.is_empty() || name.is_empty() || parts.next().is_some() {
        return Err(anyhow!(
            "repository '{key}' is invalid; expected owner/repo format"
        ));
    }
    Ok((owner, name))
}
