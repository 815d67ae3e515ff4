use chrono::{DateTime, Utc};

use super::{
    events::RawEvent,
    rules::{RepoRule, MATCH_ANY_COMMENT},
    state::{IssueRef, NotifyItem},
};

const EXCERPT_MAX_CHARS: usize = 40;

/// Events at or before the watermark were already processed by an earlier
/// cycle; they only reappear because the issue events endpoint has no
/// `since` cursor.
pub fn is_stale(event: &RawEvent, last_fetched: Option<DateTime<Utc>>) -> bool {
    last_fetched.is_some_and(|watermark| event.occurred_at() < watermark)
}

/// Pure rule matching: zero or one notification candidate per event.
///
/// Rule entries are checked in insertion order and the first hit wins; an
/// empty rule list for the event's kind means "not interested" and the event
/// body is never inspected.
pub fn match_event(event: &RawEvent, rule: &RepoRule) -> Option<NotifyItem> {
    match event {
        RawEvent::Labeled {
            actor,
            label,
            issue_number,
            issue_title,
            repo,
            link,
            created_at,
            ..
        } => {
            let matched = rule
                .labeled
                .iter()
                .find(|entry| entry.to_lowercase() == label.to_lowercase())?;
            let reason = match actor {
                Some(actor) => format!("@{actor} added label: \"{matched}\""),
                None => format!("Added label: \"{matched}\""),
            };
            Some(NotifyItem {
                id: event.notify_id(),
                event_type: event.kind(),
                reason,
                created_at: *created_at,
                repo_name: repo.clone(),
                link: link.clone(),
                issue: IssueRef {
                    number: *issue_number,
                    title: issue_title.clone(),
                },
            })
        }
        RawEvent::Mentioned {
            actor,
            issue_number,
            issue_title,
            repo,
            link,
            created_at,
            ..
        } => {
            let matched = rule.mentioned.iter().find(|entry| *entry == actor)?;
            Some(NotifyItem {
                id: event.notify_id(),
                event_type: event.kind(),
                reason: format!("@{matched} was mentioned in the issue"),
                created_at: *created_at,
                repo_name: repo.clone(),
                link: link.clone(),
                issue: IssueRef {
                    number: *issue_number,
                    title: issue_title.clone(),
                },
            })
        }
        RawEvent::Commented {
            author,
            body,
            issue_number,
            issue_title,
            repo,
            link,
            updated_at,
            ..
        } => {
            let matched_text = match_comment_body(body, &rule.comment_patterns)?;
            let reason = format!("@{author} commented: \"{}\"", excerpt(matched_text));
            Some(NotifyItem {
                id: event.notify_id(),
                event_type: event.kind(),
                reason,
                created_at: *updated_at,
                repo_name: repo.clone(),
                link: link.clone(),
                issue: IssueRef {
                    number: *issue_number,
                    title: issue_title.clone(),
                },
            })
        }
    }
}

/// Returns the matched text: the whole body for the `*` sentinel, otherwise
/// the first configured pattern contained in the body as a literal substring.
fn match_comment_body<'a>(body: &'a str, patterns: &'a [String]) -> Option<&'a str> {
    if patterns.is_empty() {
        return None;
    }
    if patterns.iter().any(|pattern| pattern == MATCH_ANY_COMMENT) {
        if body.is_empty() {
            return None;
        }
        return Some(body);
    }
    patterns
        .iter()
        .find(|pattern| body.contains(pattern.as_str()))
        .map(String::as_str)
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text.to_string();
    }
    let mut clipped = text.chars().take(EXCERPT_MAX_CHARS).collect::<String>();
    clipped.push_str("...");
    clipped
}
