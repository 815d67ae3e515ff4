pub mod github;
pub mod notifier;
pub mod store_sqlite;
