pub mod adapt;
mod client;
mod models;

pub use client::{api_url_from_root, web_origin_from_root, RestApiClient};
pub use models::{ApiComment, ApiIssue, ApiIssueEvent, ApiIssueRef, ApiLabel, ApiUser};
