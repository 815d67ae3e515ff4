use anyhow::{Context, Result};

use crate::{
    cli::state::{open_store, resolve_state_db_path},
    config::Config,
    infra::{github::RestApiClient, notifier::DesktopNotifier},
    ports::{ApiClientPort, NotifierPort, RuleStorePort},
};

pub(crate) async fn run(cfg: Config) -> Result<()> {
    let api = RestApiClient::from_config(&cfg)?;
    let login = api
        .check_auth()
        .await
        .context("GitHub authentication is invalid; check github.token and github.root_url")?;

    let notifier = DesktopNotifier;
    notifier
        .check_health()
        .context("notification backend check failed")?;

    let state_path = resolve_state_db_path(&cfg)?;
    let store = open_store(&state_path)?;
    let rules = store.load_rules()?;

    println!("auth: ok ({login})");
    println!("notifier: ok");
    println!("state db: {}", state_path.display());
    println!("watched repositories: {}", rules.len());
    for repo in rules.keys() {
        println!("- {repo}");
    }
    if rules.is_empty() {
        println!("hint: add one with `gh-radar rules set owner/repo --labeled bug`");
    }
    Ok(())
}
