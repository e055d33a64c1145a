//! Reddit search client (password-grant OAuth).

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use brandmon_core::{AppConfig, Engagement, Mention, Platform};
use brandmon_sentiment::classify_compact;

use crate::error::SearchError;
use crate::mock::mock_mentions;

const DEFAULT_WWW_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_OAUTH_BASE_URL: &str = "https://oauth.reddit.com";
const PAGE_LIMIT: u32 = 10;

/// Credentials for the password grant. All four parts are required for a
/// live request; anything less routes to the mock generator.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

/// Client for Reddit's search API.
pub struct RedditSearch {
    client: Client,
    credentials: Option<RedditCredentials>,
    user_agent: String,
    www_base_url: Url,
    oauth_base_url: Url,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    kind: Option<String>,
    data: Post,
}

#[derive(Deserialize)]
struct Post {
    id: String,
    title: Option<String>,
    body: Option<String>,
    author: Option<String>,
    permalink: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u32,
    created_utc: Option<f64>,
}

impl RedditSearch {
    /// Builds a client from config; credentials are optional.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let credentials = match (
            &config.reddit_client_id,
            &config.reddit_client_secret,
            &config.reddit_username,
            &config.reddit_password,
        ) {
            (Some(id), Some(secret), Some(user), Some(pass)) => Some(RedditCredentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
                username: user.clone(),
                password: pass.clone(),
            }),
            _ => None,
        };

        Self::with_base_urls(
            credentials,
            config.search_request_timeout_secs,
            &config.search_user_agent,
            DEFAULT_WWW_BASE_URL,
            DEFAULT_OAUTH_BASE_URL,
        )
    }

    /// Builds a client with custom base URLs (for testing with wiremock —
    /// point both at the same mock server).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built, or
    /// [`SearchError::Api`] if a base URL is invalid.
    pub fn with_base_urls(
        credentials: Option<RedditCredentials>,
        timeout_secs: u64,
        user_agent: &str,
        www_base_url: &str,
        oauth_base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let parse = |raw: &str| {
            Url::parse(raw).map_err(|e| SearchError::Api(format!("invalid base URL '{raw}': {e}")))
        };
        Ok(Self {
            client,
            credentials,
            user_agent: user_agent.to_owned(),
            www_base_url: parse(www_base_url)?,
            oauth_base_url: parse(oauth_base_url)?,
        })
    }

    /// Searches Reddit posts and comments for a keyword.
    ///
    /// Missing credentials or a failed live request both answer with a mock
    /// batch.
    pub async fn search(&self, keyword: &str) -> Vec<Mention> {
        let Some(credentials) = &self.credentials else {
            tracing::info!("reddit credentials not configured, returning mock data");
            return mock_mentions(keyword, Platform::Reddit, &mut rand::rng());
        };

        match self.search_live(credentials, keyword).await {
            Ok(mentions) => mentions,
            Err(error) => {
                tracing::warn!(keyword, error = %error, "reddit search failed, returning mock data");
                mock_mentions(keyword, Platform::Reddit, &mut rand::rng())
            }
        }
    }

    async fn search_live(
        &self,
        credentials: &RedditCredentials,
        keyword: &str,
    ) -> Result<Vec<Mention>, SearchError> {
        let token = self.fetch_token(credentials).await?;

        let mut url = self.oauth_base_url.clone();
        url.set_path("/search");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", keyword);
            pairs.append_pair("sort", "new");
            pairs.append_pair("limit", &PAGE_LIMIT.to_string());
        }

        let response = self
            .client
            .get(url)
            .bearer_auth(&token)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let listing: Listing = serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: format!("reddit search(keyword={keyword})"),
            source: e,
        })?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(into_mention)
            .collect())
    }

    async fn fetch_token(&self, credentials: &RedditCredentials) -> Result<String, SearchError> {
        let mut url = self.www_base_url.clone();
        url.set_path("/api/v1/access_token");

        let response = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Api(format!(
                "reddit token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Api(format!("reddit token parse error: {e}")))?;
        Ok(token.access_token)
    }
}

fn into_mention(child: Child) -> Mention {
    // t1 listings are comments: the text lives in `body`, not `title`.
    let is_comment = child.kind.as_deref() == Some("t1");
    let post = child.data;

    let content = if is_comment {
        post.body.unwrap_or_default()
    } else {
        post.title.unwrap_or_default()
    };

    let author = post
        .author
        .map(|a| format!("u/{a}"))
        .unwrap_or_else(|| "u/[deleted]".to_string());

    let url = post
        .permalink
        .map(|p| format!("https://reddit.com{p}"));

    let created_at = post
        .created_utc
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0))
        .unwrap_or_else(Utc::now);

    let sentiment = classify_compact(&content);
    let likes = u32::try_from(post.score.max(0)).unwrap_or(u32::MAX);

    Mention {
        id: post.id,
        content,
        platform: Platform::Reddit,
        author,
        sentiment,
        url,
        engagement: Some(Engagement {
            likes: Some(likes),
            comments: Some(post.num_comments),
            ..Engagement::default()
        }),
        created_at,
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_listing() {
        let json = r#"{
            "data": {
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "id": "abc123",
                            "title": "widget is great",
                            "author": "redditor1",
                            "permalink": "/r/technology/comments/abc123/widget_is_great/",
                            "score": 450,
                            "num_comments": 120,
                            "created_utc": 1751371200.0
                        }
                    }
                ]
            }
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data.children.len(), 1);
        assert_eq!(listing.data.children[0].data.id, "abc123");
    }

    #[test]
    fn post_maps_title_author_and_engagement() {
        let child = Child {
            kind: Some("t3".to_string()),
            data: Post {
                id: "abc123".to_string(),
                title: Some("widget is great".to_string()),
                body: None,
                author: Some("redditor1".to_string()),
                permalink: Some("/r/technology/comments/abc123/".to_string()),
                score: 450,
                num_comments: 120,
                created_utc: Some(1_751_371_200.0),
            },
        };
        let mention = into_mention(child);
        assert_eq!(mention.content, "widget is great");
        assert_eq!(mention.author, "u/redditor1");
        assert_eq!(
            mention.url.as_deref(),
            Some("https://reddit.com/r/technology/comments/abc123/")
        );
        let engagement = mention.engagement.unwrap();
        assert_eq!(engagement.likes, Some(450));
        assert_eq!(engagement.comments, Some(120));
    }

    #[test]
    fn comment_uses_body_text() {
        let child = Child {
            kind: Some("t1".to_string()),
            data: Post {
                id: "c1".to_string(),
                title: None,
                body: Some("widget is terrible honestly".to_string()),
                author: Some("redditor2".to_string()),
                permalink: None,
                score: -4,
                num_comments: 0,
                created_utc: None,
            },
        };
        let mention = into_mention(child);
        assert_eq!(mention.content, "widget is terrible honestly");
        assert_eq!(mention.sentiment, brandmon_core::Sentiment::Negative);
        // Downvoted below zero still yields a non-negative counter.
        assert_eq!(mention.engagement.unwrap().likes, Some(0));
    }

    #[tokio::test]
    async fn missing_credentials_return_mock_batch() {
        let search = RedditSearch::with_base_urls(
            None,
            5,
            "brandmon/test",
            "http://localhost:1",
            "http://localhost:1",
        )
        .expect("client");
        let mentions = search.search("widget").await;
        assert_eq!(mentions.len(), 5);
        assert!(mentions.iter().all(|m| m.platform == Platform::Reddit));
    }
}
