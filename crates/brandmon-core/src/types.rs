use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),
}

/// A content source tracked by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Reddit,
    Facebook,
    News,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Reddit,
        Platform::Facebook,
        Platform::News,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
            Platform::Facebook => "facebook",
            Platform::News => "news",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Platform::Twitter),
            "reddit" => Ok(Platform::Reddit),
            "facebook" => Ok(Platform::Facebook),
            "news" => Ok(Platform::News),
            other => Err(CoreError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Three-way sentiment classification derived by keyword counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(format!("invalid sentiment: {other}")),
        }
    }
}

/// Search window for external queries, as accepted by the search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// Wire code understood by the search provider's `qdr:` filter.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            TimeRange::Week => "w",
            TimeRange::Month => "m",
            TimeRange::Year => "y",
        }
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "week" => Ok(TimeRange::Week),
            "m" | "month" => Ok(TimeRange::Month),
            "y" | "year" => Ok(TimeRange::Year),
            other => Err(CoreError::InvalidTimeRange(other.to_string())),
        }
    }
}

/// Sparse engagement counters. Platforms populate disjoint subsets:
/// twitter likes/retweets/replies, reddit likes/comments, facebook
/// likes/shares/comments, news shares. Every present value is a
/// non-negative integer.
///
/// Serialized in camelCase to match what the dashboard UI reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
}

impl Engagement {
    /// True when no counter is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.likes.is_none()
            && self.retweets.is_none()
            && self.replies.is_none()
            && self.shares.is_none()
            && self.comments.is_none()
    }
}

/// A normalized record of one piece of content referencing a tracked
/// keyword.
///
/// `id` is stable per source URL where derivable (see the stable ID
/// generator); deduplication key is `(id, owner)` at the persistence layer.
/// `sentiment` is computed from `content` at ingestion time and never
/// recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: String,
    pub content: String,
    pub platform: Platform,
    pub author: String,
    pub sentiment: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Engagement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
