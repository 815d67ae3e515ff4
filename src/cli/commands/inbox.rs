use anyhow::{anyhow, Result};

use crate::{
    cli::args::InboxCommands,
    cli::state::{open_store, resolve_state_db_path},
    cli::SystemClock,
    config::Config,
    ports::{ClockPort, NotifyStorePort},
};

pub(crate) fn run(cfg: Config, command: InboxCommands) -> Result<()> {
    let state_path = resolve_state_db_path(&cfg)?;
    let store = open_store(&state_path)?;
    let mut state = store.load_state()?;
    let now = SystemClock.now();

    match command {
        InboxCommands::List => {
            if state.unread_count() == 0 {
                println!("inbox empty");
                return Ok(());
            }
            for (repo, items) in &state.items_by_repo {
                println!("{repo}");
                for item in items {
                    println!("  [{}] {}", item.id, item.reason);
                    println!("      {}", item.link);
                }
            }
            println!("{} unread", state.unread_count());
            Ok(())
        }
        InboxCommands::Read { id } => {
            let repo = state
                .find_item(&id)
                .map(|item| item.repo_name.clone())
                .ok_or_else(|| anyhow!("no notification with id '{id}'"))?;
            state.dismiss_item(&repo, &id, now);
            store.save_state(&state)?;
            println!("marked {id} read");
            Ok(())
        }
        InboxCommands::Clear => {
            let dismissed = state.dismiss_all(now);
            store.save_state(&state)?;
            println!("marked {dismissed} notifications read");
            Ok(())
        }
    }
}
