use anyhow::{Context, Result};

use crate::{
    app::watch_loop::run_watch,
    cli::{
        state::{open_store, resolve_state_db_path},
        SystemClock,
    },
    config::Config,
    infra::{github::RestApiClient, notifier::DesktopNotifier},
    ports::{ApiClientPort, NotifierPort},
};

pub(crate) async fn run(cfg: Config) -> Result<()> {
    let api = RestApiClient::from_config(&cfg)?;
    let login = api
        .check_auth()
        .await
        .context("GitHub authentication is invalid; check github.token and github.root_url")?;
    eprintln!("authenticated as: {login}");

    let state_path = resolve_state_db_path(&cfg)?;
    let store = open_store(&state_path)?;

    let notifier = DesktopNotifier;
    notifier
        .check_health()
        .context("notification backend check failed")?;

    run_watch(&cfg, &api, &store, &store, &notifier, &SystemClock).await
}
