//! Mention ingestion pipeline for Brand Monitor.
//!
//! Issues site-scoped searches against the Google Custom Search JSON API,
//! normalizes each raw hit into a [`brandmon_core::Mention`] (stable ID,
//! author and engagement extraction, sentiment classification), and provides
//! the direct platform clients (Twitter/Reddit/Facebook) plus the mock
//! generator used whenever credentials are absent or a live request fails.

pub mod author;
pub mod engagement;
pub mod mock;
pub mod stable_id;

mod error;
mod orchestrator;
mod platforms;
mod provider;
mod types;

pub use error::SearchError;
pub use orchestrator::{site_scope, SearchOrchestrator};
pub use platforms::{FacebookSearch, RedditCredentials, RedditSearch, TwitterSearch};
pub use provider::GoogleSearchClient;
pub use types::RawSearchResult;
