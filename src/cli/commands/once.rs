use anyhow::{Context, Result};

use crate::{
    app::poll_cycle::poll_cycle,
    cli::{
        state::{open_store, resolve_state_db_path},
        SystemClock,
    },
    config::Config,
    infra::{github::RestApiClient, notifier::DesktopNotifier},
    ports::{ApiClientPort, NotifierPort},
};

pub(crate) async fn run(cfg: Config, json: bool) -> Result<()> {
    let api = RestApiClient::from_config(&cfg)?;
    api.check_auth()
        .await
        .context("GitHub authentication is invalid; check github.token and github.root_url")?;

    let state_path = resolve_state_db_path(&cfg)?;
    let store = open_store(&state_path)?;

    let notifier = DesktopNotifier;
    notifier
        .check_health()
        .context("notification backend check failed")?;

    let outcome = poll_cycle(&cfg, &api, &store, &store, &notifier, &SystemClock).await?;

    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("new: {}", outcome.new_item_ids.len());
        println!("unread: {}", outcome.unread_count);
        println!("suppressed_by_dismissal: {}", outcome.suppressed_items);
        println!("repo_fetch_failures: {}", outcome.fetch_failures.len());
        for failure in &outcome.fetch_failures {
            println!("- {}: {}", failure.repo, failure.message);
        }
    }

    Ok(())
}
