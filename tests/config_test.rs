use gh_radar::config::{parse_config, MIN_INTERVAL_MINUTES};

#[test]
fn minimal_config_gets_defaults() {
    let cfg = parse_config("").unwrap();

    assert_eq!(cfg.interval_minutes, 5);
    assert_eq!(cfg.github.root_url, "https://github.com");
    assert!(cfg.github.token.is_none());
    assert!(cfg.notifications.show_desktop);
    assert!(!cfg.notifications.play_sound);
    assert_eq!(cfg.fetch.stale_after_hours, 2);
    assert_eq!(cfg.fetch.wide_comment_page, 60);
    assert_eq!(cfg.fetch.wide_issue_page, 20);
    assert_eq!(cfg.fetch.narrow_comment_page, 30);
    assert_eq!(cfg.fetch.narrow_issue_page, 10);
    assert_eq!(cfg.fetch.events_page, 40);
}

#[test]
fn explicit_values_override_defaults() {
    let cfg = parse_config(
        r#"
interval_minutes = 10
state_db_path = "/tmp/radar.db"

[github]
token = "token-value"
root_url = "https://ghe.example.com"

[notifications]
show_desktop = false
play_sound = true

[fetch]
narrow_comment_page = 15
"#,
    )
    .unwrap();

    assert_eq!(cfg.interval_minutes, 10);
    assert_eq!(cfg.state_db_path.as_deref(), Some("/tmp/radar.db"));
    assert_eq!(cfg.github.root_url, "https://ghe.example.com");
    assert!(!cfg.notifications.show_desktop);
    assert!(cfg.notifications.play_sound);
    assert_eq!(cfg.fetch.narrow_comment_page, 15);
    // Unspecified tuning values keep their defaults.
    assert_eq!(cfg.fetch.wide_comment_page, 60);
}

#[test]
fn interval_below_rate_limit_floor_is_rejected() {
    let err = parse_config("interval_minutes = 1").unwrap_err();
    assert!(err
        .to_string()
        .contains(&format!(">= {MIN_INTERVAL_MINUTES}")));

    assert!(parse_config("interval_minutes = 2").is_ok());
}

#[test]
fn zero_fetch_pages_are_rejected() {
    let err = parse_config("[fetch]\nevents_page = 0").unwrap_err();
    assert!(err.to_string().contains("events_page"));

    let err = parse_config("[fetch]\ntimeout_seconds = 0").unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
}

#[test]
fn empty_root_url_is_rejected() {
    let err = parse_config("[github]\nroot_url = \"\"").unwrap_err();
    assert!(err.to_string().contains("root_url"));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    assert!(parse_config("interval_minutes = ").is_err());
}
