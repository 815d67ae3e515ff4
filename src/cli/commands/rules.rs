use anyhow::Result;

use crate::{
    cli::args::RulesCommands,
    cli::state::{open_store, resolve_state_db_path},
    config::Config,
    domain::rules::{parse_repo_key, RepoRule},
    ports::RuleStorePort,
};

pub(crate) fn run(cfg: Config, command: RulesCommands) -> Result<()> {
    let state_path = resolve_state_db_path(&cfg)?;
    let store = open_store(&state_path)?;

    match command {
        RulesCommands::List => {
            let rules = store.load_rules()?;
            if rules.is_empty() {
                println!("no rules configured");
                return Ok(());
            }
            for (repo, rule) in rules {
                println!("{repo}");
                print_rule_field("labeled", &rule.labeled);
                print_rule_field("mentioned", &rule.mentioned);
                print_rule_field("comment_patterns", &rule.comment_patterns);
            }
            Ok(())
        }
        RulesCommands::Set {
            repo,
            labeled,
            mentioned,
            comment_patterns,
        } => {
            parse_repo_key(&repo)?;
            let rule = RepoRule {
                labeled,
                mentioned,
                comment_patterns,
            };
            if rule.is_empty() {
                println!("warning: rule for {repo} has no entries and will never match");
            }
            store.save_rule(&repo, &rule)?;
            println!("saved rule for {repo}");
            Ok(())
        }
        RulesCommands::Remove { repo } => {
            if store.remove_rule(&repo)? {
                println!("removed rule for {repo}");
            } else {
                println!("no rule found for {repo}");
            }
            Ok(())
        }
    }
}

fn print_rule_field(name: &str, entries: &[String]) {
    if !entries.is_empty() {
        println!("  {name}: {}", entries.join(", "));
    }
}
