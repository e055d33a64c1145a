//! Facebook Graph post-search client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use brandmon_core::{AppConfig, Engagement, Mention, Platform};
use brandmon_sentiment::classify_compact;

use crate::error::SearchError;
use crate::mock::mock_mentions;

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
const GRAPH_VERSION: &str = "v18.0";

/// Client for the Facebook Graph search endpoint.
pub struct FacebookSearch {
    client: Client,
    access_token: Option<String>,
    base_url: Url,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<FacebookPost>,
}

#[derive(Deserialize)]
struct FacebookPost {
    id: String,
    message: Option<String>,
    created_time: Option<String>,
    from: Option<FacebookAuthor>,
    shares: Option<ShareCount>,
    reactions: Option<Summarized>,
    comments: Option<Summarized>,
}

#[derive(Deserialize)]
struct FacebookAuthor {
    name: String,
}

#[derive(Deserialize)]
struct ShareCount {
    #[serde(default)]
    count: u32,
}

#[derive(Deserialize)]
struct Summarized {
    summary: Option<SummaryCount>,
}

#[derive(Deserialize)]
struct SummaryCount {
    #[serde(default)]
    total_count: u32,
}

impl FacebookSearch {
    /// Builds a client from config; a missing access token routes every
    /// search to the mock generator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Self::with_base_url(
            config.facebook_access_token.clone(),
            config.search_request_timeout_secs,
            &config.search_user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Builds a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built, or
    /// [`SearchError::Api`] if `base_url` is invalid.
    pub fn with_base_url(
        access_token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| SearchError::Api(format!("invalid base URL '{base_url}': {e}")))?;
        Ok(Self {
            client,
            access_token,
            base_url,
        })
    }

    /// Searches public posts for a keyword.
    ///
    /// Missing credentials or a failed live request both answer with a mock
    /// batch.
    pub async fn search(&self, keyword: &str) -> Vec<Mention> {
        let Some(token) = &self.access_token else {
            tracing::info!("facebook credentials not configured, returning mock data");
            return mock_mentions(keyword, Platform::Facebook, &mut rand::rng());
        };

        match self.search_live(token, keyword).await {
            Ok(mentions) => mentions,
            Err(error) => {
                tracing::warn!(keyword, error = %error, "facebook search failed, returning mock data");
                mock_mentions(keyword, Platform::Facebook, &mut rand::rng())
            }
        }
    }

    async fn search_live(&self, token: &str, keyword: &str) -> Result<Vec<Mention>, SearchError> {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/{GRAPH_VERSION}/search"));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", keyword);
            pairs.append_pair("type", "post");
            pairs.append_pair("access_token", token);
            pairs.append_pair(
                "fields",
                "id,message,created_time,from,shares,reactions.summary(true),comments.summary(true)",
            );
        }

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("facebook search(keyword={keyword})"),
                source: e,
            })?;

        Ok(parsed.data.into_iter().map(into_mention).collect())
    }
}

fn into_mention(post: FacebookPost) -> Mention {
    let content = post.message.unwrap_or_default();
    let author = post
        .from
        .map(|a| a.name)
        .unwrap_or_else(|| "Unknown".to_string());
    let url = format!("https://facebook.com/{}", post.id);

    let likes = post
        .reactions
        .and_then(|r| r.summary)
        .map_or(0, |s| s.total_count);
    let comments = post
        .comments
        .and_then(|c| c.summary)
        .map_or(0, |s| s.total_count);
    let shares = post.shares.map_or(0, |s| s.count);

    let sentiment = classify_compact(&content);
    let created_at = post
        .created_time
        .as_deref()
        .and_then(parse_graph_time)
        .unwrap_or_else(Utc::now);

    Mention {
        id: post.id,
        content,
        platform: Platform::Facebook,
        author,
        sentiment,
        url: Some(url),
        engagement: Some(Engagement {
            likes: Some(likes),
            shares: Some(shares),
            comments: Some(comments),
            ..Engagement::default()
        }),
        created_at,
        updated_at: Utc::now(),
    }
}

/// The Graph API formats timestamps as `2025-07-01T12:00:00+0000` (no colon
/// in the offset), which RFC 3339 parsing rejects.
fn parse_graph_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
