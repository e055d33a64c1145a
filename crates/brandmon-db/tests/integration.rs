//! Offline unit tests for brandmon-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use brandmon_core::{AppConfig, Environment};
use brandmon_db::{MentionRow, PoolConfig};
use chrono::Utc;
use uuid::Uuid;

fn test_app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        api_key_hash_salt: "salt".to_string(),
        google_api_key: None,
        google_search_engine_id: None,
        twitter_bearer_token: None,
        reddit_client_id: None,
        reddit_client_secret: None,
        reddit_username: None,
        reddit_password: None,
        facebook_access_token: None,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        search_request_timeout_secs: 30,
        search_user_agent: "ua".to_string(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&test_app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn mention_row_converts_back_to_mention() {
    let row = MentionRow {
        id: "twitter-1234567890".to_string(),
        user_id: Uuid::new_v4(),
        content: "I love widget, it's the best!".to_string(),
        platform: "twitter".to_string(),
        author: "Jane Doe".to_string(),
        sentiment: "positive".to_string(),
        url: Some("https://x.com/janedoe/status/1234567890".to_string()),
        engagement: Some(serde_json::json!({ "likes": 42, "retweets": 7 })),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let mention = row.into_mention().expect("row should convert");
    assert_eq!(mention.platform, brandmon_core::Platform::Twitter);
    assert_eq!(mention.sentiment, brandmon_core::Sentiment::Positive);
    let engagement = mention.engagement.expect("engagement present");
    assert_eq!(engagement.likes, Some(42));
    assert_eq!(engagement.retweets, Some(7));
    assert_eq!(engagement.shares, None);
}

#[test]
fn mention_row_with_unknown_platform_fails_to_convert() {
    let row = MentionRow {
        id: "x-1".to_string(),
        user_id: Uuid::new_v4(),
        content: String::new(),
        platform: "myspace".to_string(),
        author: "a".to_string(),
        sentiment: "neutral".to_string(),
        url: None,
        engagement: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert!(row.into_mention().is_err());
}
