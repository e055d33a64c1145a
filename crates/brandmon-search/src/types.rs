use chrono::{DateTime, Utc};

/// A raw hit from the external search provider, before normalization.
#[derive(Debug, Clone)]
pub struct RawSearchResult {
    /// Result title as indexed (e.g. `"Jane Doe on X"`).
    pub title: String,
    /// Source link.
    pub link: String,
    /// Snippet/body text. May be empty.
    pub snippet: String,
    /// Publish date from the result's `article:published_time` metatag,
    /// when present and parseable.
    pub published_at: Option<DateTime<Utc>>,
}
