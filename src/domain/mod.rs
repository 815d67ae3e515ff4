pub mod events;
pub mod matcher;
pub mod rules;
pub mod state;
