//! Site-scoped search orchestration.
//!
//! Maps a platform to its site scope, runs one external search per
//! (keyword, platform, time range), and normalizes every raw hit into a
//! [`Mention`] by composing the stable ID generator, the field extractors
//! and the sentiment classifier.

use std::str::FromStr;

use chrono::Utc;
use rand::Rng;

use brandmon_core::{AppConfig, Mention, Platform, TimeRange};
use brandmon_sentiment::classify;

use crate::author::extract_author;
use crate::engagement::extract_engagement;
use crate::error::SearchError;
use crate::mock::mock_mentions;
use crate::provider::GoogleSearchClient;
use crate::stable_id::stable_id;
use crate::types::RawSearchResult;

/// Site scope used in the provider query for each platform.
#[must_use]
pub fn site_scope(platform: Platform) -> &'static str {
    match platform {
        Platform::Twitter => "x.com",
        Platform::Reddit => "reddit.com",
        Platform::Facebook => "facebook.com",
        Platform::News => "news.google.com",
    }
}

/// Runs site-scoped searches and converts raw hits into mentions.
///
/// Built without a provider (no search credentials configured), every
/// search answers with a mock batch instead. With a provider, a transient
/// provider failure is logged and answered with an empty list — callers
/// must treat empty as "no results or transient failure", not a hard
/// error.
pub struct SearchOrchestrator {
    provider: Option<GoogleSearchClient>,
}

impl SearchOrchestrator {
    /// Builds an orchestrator from config, constructing the provider client
    /// only when both Google credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let provider = match (&config.google_api_key, &config.google_search_engine_id) {
            (Some(key), Some(cx)) => Some(GoogleSearchClient::new(
                key,
                cx,
                config.search_request_timeout_secs,
                &config.search_user_agent,
            )?),
            _ => {
                tracing::info!("search credentials not configured, mock data will be served");
                None
            }
        };
        Ok(Self { provider })
    }

    /// Builds an orchestrator around an explicit provider (tests point this
    /// at a wiremock server).
    #[must_use]
    pub fn with_provider(provider: GoogleSearchClient) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Builds an orchestrator with no provider: every search yields mocks.
    #[must_use]
    pub fn without_provider() -> Self {
        Self { provider: None }
    }

    /// Parses the platform name, then searches. Unknown names fail here,
    /// before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPlatform`] for an unknown name.
    pub async fn search_platform_named(
        &self,
        keyword: &str,
        platform: &str,
        time_range: TimeRange,
    ) -> Result<Vec<Mention>, SearchError> {
        let platform = Platform::from_str(platform)?;
        Ok(self.search_platform(keyword, platform, time_range).await)
    }

    /// Searches one platform and returns normalized mentions.
    ///
    /// Provider failures do not propagate: they are logged and converted to
    /// an empty list for this platform.
    pub async fn search_platform(
        &self,
        keyword: &str,
        platform: Platform,
        time_range: TimeRange,
    ) -> Vec<Mention> {
        let Some(provider) = &self.provider else {
            return mock_mentions(keyword, platform, &mut rand::rng());
        };

        match provider
            .search_site(keyword, site_scope(platform), time_range)
            .await
        {
            Ok(results) => {
                let mut rng = rand::rng();
                results
                    .into_iter()
                    .map(|result| normalize_result(&result, platform, &mut rng))
                    .collect()
            }
            Err(error) => {
                tracing::warn!(
                    keyword,
                    platform = %platform,
                    error = %error,
                    "platform search failed, returning no results"
                );
                Vec::new()
            }
        }
    }
}

/// Converts one raw search hit into a [`Mention`].
///
/// `created_at` comes from the hit's detected publish date when available,
/// otherwise ingestion time. Sentiment is classified from the snippet with
/// the full vocabulary.
pub(crate) fn normalize_result(
    result: &RawSearchResult,
    platform: Platform,
    rng: &mut impl Rng,
) -> Mention {
    let now = Utc::now();
    Mention {
        id: stable_id(&result.link, rng),
        content: result.snippet.clone(),
        platform,
        author: extract_author(&result.title, platform, Some(&result.snippet)),
        sentiment: classify(&result.snippet),
        url: Some(result.link.clone()),
        engagement: Some(extract_engagement(
            &result.title,
            &result.snippet,
            platform,
            rng,
        )),
        created_at: result.published_at.unwrap_or(now),
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandmon_core::Sentiment;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn raw(title: &str, link: &str, snippet: &str) -> RawSearchResult {
        RawSearchResult {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
            published_at: None,
        }
    }

    #[test]
    fn site_scope_covers_all_platforms() {
        assert_eq!(site_scope(Platform::Twitter), "x.com");
        assert_eq!(site_scope(Platform::Reddit), "reddit.com");
        assert_eq!(site_scope(Platform::Facebook), "facebook.com");
        assert_eq!(site_scope(Platform::News), "news.google.com");
    }

    #[test]
    fn normalize_result_builds_a_positive_twitter_mention() {
        let result = raw(
            "Jane Doe on X",
            "https://x.com/janedoe/status/1234567890",
            "I love widget, it's the best!",
        );
        let mut rng = StdRng::seed_from_u64(3);
        let mention = normalize_result(&result, Platform::Twitter, &mut rng);

        assert_eq!(mention.platform, Platform::Twitter);
        assert_eq!(mention.author, "Jane Doe");
        assert_eq!(mention.sentiment, Sentiment::Positive);
        assert_eq!(mention.id, "twitter-1234567890");
        assert_eq!(mention.url.as_deref(), Some("https://x.com/janedoe/status/1234567890"));
        assert!(mention.engagement.is_some());
    }

    #[test]
    fn normalize_result_uses_publish_date_when_present() {
        let published = "2025-06-15T08:30:00Z".parse::<chrono::DateTime<Utc>>().unwrap();
        let mut result = raw(
            "Widget roundup - Tech Daily",
            "https://news.example.com/widget-roundup",
            "A look at widget",
        );
        result.published_at = Some(published);
        let mut rng = StdRng::seed_from_u64(3);
        let mention = normalize_result(&result, Platform::News, &mut rng);
        assert_eq!(mention.created_at, published);
    }

    #[tokio::test]
    async fn unsupported_platform_fails_before_any_network_call() {
        // No provider configured; an unknown name must still error rather
        // than fall through to mocks.
        let orchestrator = SearchOrchestrator::without_provider();
        let err = orchestrator
            .search_platform_named("widget", "tiktok", TimeRange::Week)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedPlatform(name) if name == "tiktok"));
    }

    #[tokio::test]
    async fn missing_provider_serves_mock_batch() {
        let orchestrator = SearchOrchestrator::without_provider();
        let mentions = orchestrator
            .search_platform("widget", Platform::Twitter, TimeRange::Week)
            .await;
        assert_eq!(mentions.len(), 5);
        assert!(mentions.iter().all(|m| m.id.starts_with("mock-twitter-")));
        assert!(mentions.iter().all(|m| m.content.contains("widget")));
    }
}
