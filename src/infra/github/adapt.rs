//! Adapter functions from API response shapes to [`RawEvent`]s, one per
//! source endpoint. Records the engine cannot use (unhandled event types,
//! unparsable permalinks, missing issue references) are dropped here rather
//! than failing a repository's whole fetch.

use crate::domain::events::RawEvent;

use super::models::{ApiComment, ApiIssue, ApiIssueEvent, ApiUser};

pub fn issue_event_to_raw(repo: &str, web_origin: &str, event: ApiIssueEvent) -> Option<RawEvent> {
    let issue = event.issue?;
    let link = format!("{web_origin}/{repo}/issues/{}", issue.number);

    match event.event.as_str() {
        "labeled" => Some(RawEvent::Labeled {
            event_id: event.id,
            repo: repo.to_string(),
            actor: event.actor.map(|user| user.login),
            label: event.label?.name,
            issue_number: issue.number,
            issue_title: issue.title,
            link,
            created_at: event.created_at,
        }),
        "mentioned" => Some(RawEvent::Mentioned {
            event_id: event.id,
            repo: repo.to_string(),
            actor: event.actor?.login,
            issue_number: issue.number,
            issue_title: issue.title,
            link,
            created_at: event.created_at,
        }),
        _ => None,
    }
}

pub fn comment_to_raw(repo: &str, comment: ApiComment) -> Option<RawEvent> {
    let issue_number = issue_number_from_comment_url(&comment.html_url)?;
    Some(RawEvent::Commented {
        comment_id: comment.id,
        repo: repo.to_string(),
        author: login_or_unknown(comment.user),
        body: comment.body.unwrap_or_default(),
        issue_number,
        issue_title: String::new(),
        link: comment.html_url,
        updated_at: comment.updated_at,
    })
}

pub fn issue_body_to_raw(repo: &str, issue: ApiIssue) -> RawEvent {
    RawEvent::Commented {
        comment_id: issue.id,
        repo: repo.to_string(),
        author: login_or_unknown(issue.user),
        body: issue.body.unwrap_or_default(),
        issue_number: issue.number,
        issue_title: issue.title,
        link: issue.html_url,
        updated_at: issue.updated_at,
    }
}

fn login_or_unknown(user: Option<ApiUser>) -> String {
    user.map(|user| user.login)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Comment permalinks look like
/// `https://github.com/octocat/hello/issues/1347#issuecomment-1`.
fn issue_number_from_comment_url(url: &str) -> Option<i64> {
    let (path, fragment) = url.split_once('#')?;
    if !fragment.starts_with("issuecomment") {
        return None;
    }
    path.rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::issue_number_from_comment_url;

    #[test]
    fn parses_issue_number_from_permalink() {
        assert_eq!(
            issue_number_from_comment_url(
                "https://github.com/octocat/hello/issues/1347#issuecomment-1"
            ),
            Some(1347)
        );
    }

    #[test]
    fn rejects_links_without_comment_fragment() {
        assert_eq!(
            issue_number_from_comment_url("https://github.com/octocat/hello/issues/1347"),
            None
        );
        assert_eq!(
            issue_number_from_comment_url(
                "https://github.com/octocat/hello/pull/9#discussion_r12"
            ),
            None
        );
    }
}
