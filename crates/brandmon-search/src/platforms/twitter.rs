//! Twitter/X recent-search client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use brandmon_core::{AppConfig, Engagement, Mention, Platform};
use brandmon_sentiment::classify_compact;

use crate::error::SearchError;
use crate::mock::mock_mentions;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
const MAX_RESULTS: u32 = 10;

/// Client for the Twitter v2 recent-search endpoint.
pub struct TwitterSearch {
    client: Client,
    bearer_token: Option<String>,
    base_url: Url,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    includes: Option<Includes>,
}

#[derive(Deserialize)]
struct Tweet {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    public_metrics: Option<PublicMetrics>,
}

#[derive(Deserialize, Default)]
struct PublicMetrics {
    #[serde(default)]
    like_count: u32,
    #[serde(default)]
    retweet_count: u32,
    #[serde(default)]
    reply_count: u32,
}

#[derive(Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<TwitterUser>,
}

#[derive(Deserialize)]
struct TwitterUser {
    id: String,
    name: String,
    username: String,
}

impl TwitterSearch {
    /// Builds a client from config. A missing bearer token is fine — it
    /// routes every search to the mock generator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Self::with_base_url(
            config.twitter_bearer_token.clone(),
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
        bearer_token: Option<String>,
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
            bearer_token,
            base_url,
        })
    }

    /// Searches recent tweets for a keyword.
    ///
    /// Missing credentials or a failed live request both answer with a mock
    /// batch, so this never fails and never returns an empty development
    /// dashboard.
    pub async fn search(&self, keyword: &str) -> Vec<Mention> {
        let Some(token) = &self.bearer_token else {
            tracing::info!("twitter credentials not configured, returning mock data");
            return mock_mentions(keyword, Platform::Twitter, &mut rand::rng());
        };

        match self.search_live(token, keyword).await {
            Ok(mentions) => mentions,
            Err(error) => {
                tracing::warn!(keyword, error = %error, "twitter search failed, returning mock data");
                mock_mentions(keyword, Platform::Twitter, &mut rand::rng())
            }
        }
    }

    async fn search_live(&self, token: &str, keyword: &str) -> Result<Vec<Mention>, SearchError> {
        let mut url = self.base_url.clone();
        url.set_path("/2/tweets/search/recent");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", keyword);
            pairs.append_pair("max_results", &MAX_RESULTS.to_string());
            pairs.append_pair("tweet.fields", "created_at,public_metrics,author_id");
            pairs.append_pair("expansions", "author_id");
            pairs.append_pair("user.fields", "name,username");
        }

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("twitter search(keyword={keyword})"),
                source: e,
            })?;

        let users = parsed
            .includes
            .map(|includes| includes.users)
            .unwrap_or_default();

        Ok(parsed
            .data
            .into_iter()
            .map(|tweet| into_mention(tweet, &users))
            .collect())
    }
}

fn into_mention(tweet: Tweet, users: &[TwitterUser]) -> Mention {
    let author_user = tweet
        .author_id
        .as_deref()
        .and_then(|id| users.iter().find(|u| u.id == id));

    let author = author_user
        .map(|u| format!("{} (@{})", u.name, u.username))
        .unwrap_or_else(|| "Unknown".to_string());

    let url = match author_user {
        Some(user) => format!("https://twitter.com/{}/status/{}", user.username, tweet.id),
        None => format!("https://twitter.com/i/status/{}", tweet.id),
    };

    let metrics = tweet.public_metrics.unwrap_or_default();
    let sentiment = classify_compact(&tweet.text);
    let now = Utc::now();

    Mention {
        id: tweet.id,
        content: tweet.text,
        platform: Platform::Twitter,
        author,
        sentiment,
        url: Some(url),
        engagement: Some(Engagement {
            likes: Some(metrics.like_count),
            retweets: Some(metrics.retweet_count),
            replies: Some(metrics.reply_count),
            ..Engagement::default()
        }),
        created_at: tweet.created_at.unwrap_or(now),
        updated_at: now,
    }
}
