pub mod fetch;
pub mod poll_cycle;
pub mod watch_loop;
