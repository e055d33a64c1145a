use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration, loaded from environment variables.
///
/// Third-party credentials are all optional: a missing credential routes the
/// corresponding search path to the mock generator instead of failing.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub api_key_hash_salt: String,
    pub google_api_key: Option<String>,
    pub google_search_engine_id: Option<String>,
    pub twitter_bearer_token: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_username: Option<String>,
    pub reddit_password: Option<String>,
    pub facebook_access_token: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub search_request_timeout_secs: u64,
    pub search_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("api_key_hash_salt", &"[redacted]")
            .field("google_api_key", &redact(&self.google_api_key))
            .field(
                "google_search_engine_id",
                &redact(&self.google_search_engine_id),
            )
            .field("twitter_bearer_token", &redact(&self.twitter_bearer_token))
            .field("reddit_client_id", &redact(&self.reddit_client_id))
            .field("reddit_client_secret", &redact(&self.reddit_client_secret))
            .field("reddit_username", &redact(&self.reddit_username))
            .field("reddit_password", &redact(&self.reddit_password))
            .field(
                "facebook_access_token",
                &redact(&self.facebook_access_token),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "search_request_timeout_secs",
                &self.search_request_timeout_secs,
            )
            .field("search_user_agent", &self.search_user_agent)
            .finish()
    }
}

impl AppConfig {
    /// True when both Google Custom Search credentials are configured.
    #[must_use]
    pub fn has_google_credentials(&self) -> bool {
        self.google_api_key.is_some() && self.google_search_engine_id.is_some()
    }
}
