//! HTTP client for the Google Custom Search JSON API.
//!
//! Wraps `reqwest` with typed response deserialization and publish-date
//! extraction from result metatags. The query is site-scoped
//! (`"keyword" site:<scope>`) and time-filtered via the `tbs=qdr:` code.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use brandmon_core::TimeRange;

use crate::error::SearchError;
use crate::types::RawSearchResult;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Client for the Google Custom Search JSON API.
///
/// Use [`GoogleSearchClient::new`] for production or
/// [`GoogleSearchClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug)]
pub struct GoogleSearchClient {
    client: Client,
    api_key: String,
    engine_id: String,
    base_url: Url,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
    pagemap: Option<PageMap>,
}

#[derive(Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl GoogleSearchClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, engine_id, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SearchError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            engine_id: engine_id.to_owned(),
            base_url,
        })
    }

    /// Runs one site-scoped search for `keyword` within `site`, filtered to
    /// `time_range`.
    ///
    /// Returns the raw hits in index order. A response with no `items` field
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure or a non-2xx HTTP status.
    /// - [`SearchError::Deserialize`] if the response body does not match the
    ///   expected shape.
    pub async fn search_site(
        &self,
        keyword: &str,
        site: &str,
        time_range: TimeRange,
    ) -> Result<Vec<RawSearchResult>, SearchError> {
        let url = self.build_url(keyword, site, time_range);

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("search(keyword={keyword}, site={site})"),
                source: e,
            })?;

        Ok(parsed.items.into_iter().map(into_raw_result).collect())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, keyword: &str, site: &str, time_range: TimeRange) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("cx", &self.engine_id);
            pairs.append_pair("q", &format!("{keyword} site:{site}"));
            pairs.append_pair("tbs", &format!("qdr:{}", time_range.code()));
        }
        url
    }
}

fn into_raw_result(item: SearchItem) -> RawSearchResult {
    let published_at = item.pagemap.as_ref().and_then(published_time);
    RawSearchResult {
        title: item.title,
        link: item.link,
        snippet: item.snippet,
        published_at,
    }
}

/// Pulls `article:published_time` out of the first metatag block that
/// carries it, tolerating non-string values.
fn published_time(pagemap: &PageMap) -> Option<DateTime<Utc>> {
    pagemap
        .metatags
        .iter()
        .find_map(|tags| tags.get("article:published_time"))
        .and_then(serde_json::Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
