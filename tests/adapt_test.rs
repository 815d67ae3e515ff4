use gh_radar::domain::events::{EventKind, RawEvent};
use gh_radar::infra::github::adapt::{comment_to_raw, issue_body_to_raw, issue_event_to_raw};
use gh_radar::infra::github::{ApiComment, ApiIssue, ApiIssueEvent};

const ORIGIN: &str = "https://github.com";

fn event_from_json(json: &str) -> ApiIssueEvent {
    serde_json::from_str(json).unwrap()
}

#[test]
fn labeled_event_payload_becomes_labeled_raw_event() {
    let event = event_from_json(
        r#"{
            "id": 101,
            "event": "labeled",
            "actor": {"login": "alice"},
            "label": {"name": "good-first-issue"},
            "issue": {"number": 42, "title": "Fix bug"},
            "created_at": "2025-01-20T11:00:00Z"
        }"#,
    );

    let raw = issue_event_to_raw("acme/api", ORIGIN, event).unwrap();
    assert_eq!(raw.kind(), EventKind::Labeled);
    assert_eq!(raw.notify_id(), "issueevent-101");
    match raw {
        RawEvent::Labeled {
            actor,
            label,
            issue_number,
            link,
            ..
        } => {
            assert_eq!(actor.as_deref(), Some("alice"));
            assert_eq!(label, "good-first-issue");
            assert_eq!(issue_number, 42);
            assert_eq!(link, "https://github.com/acme/api/issues/42");
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn mentioned_event_payload_becomes_mentioned_raw_event() {
    let event = event_from_json(
        r#"{
            "id": 102,
            "event": "mentioned",
            "actor": {"login": "bob"},
            "issue": {"number": 7, "title": "Release"},
            "created_at": "2025-01-20T11:00:00Z"
        }"#,
    );

    let raw = issue_event_to_raw("acme/api", ORIGIN, event).unwrap();
    match raw {
        RawEvent::Mentioned { actor, .. } => assert_eq!(actor, "bob"),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn unhandled_event_types_are_skipped() {
    let event = event_from_json(
        r#"{
            "id": 103,
            "event": "closed",
            "actor": {"login": "alice"},
            "issue": {"number": 1, "title": "Old"},
            "created_at": "2025-01-20T11:00:00Z"
        }"#,
    );
    assert!(issue_event_to_raw("acme/api", ORIGIN, event).is_none());
}

#[test]
fn labeled_event_without_issue_or_label_is_dropped() {
    let missing_issue = event_from_json(
        r#"{"id": 104, "event": "labeled", "label": {"name": "bug"},
            "created_at": "2025-01-20T11:00:00Z"}"#,
    );
    assert!(issue_event_to_raw("acme/api", ORIGIN, missing_issue).is_none());

    let missing_label = event_from_json(
        r#"{"id": 105, "event": "labeled",
            "issue": {"number": 2, "title": "T"},
            "created_at": "2025-01-20T11:00:00Z"}"#,
    );
    assert!(issue_event_to_raw("acme/api", ORIGIN, missing_label).is_none());
}

#[test]
fn comment_payload_parses_issue_number_from_permalink() {
    let comment: ApiComment = serde_json::from_str(
        r#"{
            "id": 555,
            "body": "urgent: please look",
            "html_url": "https://github.com/acme/api/issues/1347#issuecomment-555",
            "user": {"login": "dana"},
            "updated_at": "2025-01-20T11:30:00Z"
        }"#,
    )
    .unwrap();

    let raw = comment_to_raw("acme/api", comment).unwrap();
    assert_eq!(raw.notify_id(), "issuecomment-555");
    match raw {
        RawEvent::Commented {
            author,
            issue_number,
            body,
            ..
        } => {
            assert_eq!(author, "dana");
            assert_eq!(issue_number, 1347);
            assert_eq!(body, "urgent: please look");
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn comment_with_unparsable_permalink_is_dropped() {
    let comment: ApiComment = serde_json::from_str(
        r#"{
            "id": 556,
            "body": "hello",
            "html_url": "https://github.com/acme/api/pull/9#discussion_r12",
            "user": {"login": "dana"},
            "updated_at": "2025-01-20T11:30:00Z"
        }"#,
    )
    .unwrap();
    assert!(comment_to_raw("acme/api", comment).is_none());
}

#[test]
fn comment_without_author_falls_back_to_unknown() {
    let comment: ApiComment = serde_json::from_str(
        r#"{
            "id": 557,
            "body": "ping",
            "html_url": "https://github.com/acme/api/issues/2#issuecomment-557",
            "updated_at": "2025-01-20T11:30:00Z"
        }"#,
    )
    .unwrap();

    match comment_to_raw("acme/api", comment).unwrap() {
        RawEvent::Commented { author, .. } => assert_eq!(author, "unknown"),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn issue_body_becomes_pseudo_comment_with_issue_title() {
    let issue: ApiIssue = serde_json::from_str(
        r#"{
            "id": 9000,
            "number": 12,
            "title": "Crash on startup",
            "body": "urgent crash in FooComponent",
            "html_url": "https://github.com/acme/api/issues/12",
            "user": {"login": "erin"},
            "updated_at": "2025-01-20T11:45:00Z"
        }"#,
    )
    .unwrap();

    let raw = issue_body_to_raw("acme/api", issue);
    assert_eq!(raw.kind(), EventKind::CustomCommented);
    assert_eq!(raw.notify_id(), "issuecomment-9000");
    match raw {
        RawEvent::Commented {
            issue_number,
            issue_title,
            body,
            ..
        } => {
            assert_eq!(issue_number, 12);
            assert_eq!(issue_title, "Crash on startup");
            assert!(body.contains("FooComponent"));
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn issue_with_null_body_maps_to_empty_pseudo_comment() {
    let issue: ApiIssue = serde_json::from_str(
        r#"{
            "id": 9001,
            "number": 13,
            "title": "No description",
            "body": null,
            "html_url": "https://github.com/acme/api/issues/13",
            "user": {"login": "erin"},
            "updated_at": "2025-01-20T11:45:00Z"
        }"#,
    )
    .unwrap();

    match issue_body_to_raw("acme/api", issue) {
        RawEvent::Commented { body, .. } => assert!(body.is_empty()),
        other => panic!("unexpected variant: {other:?}"),
    }
}
