//! Database operations for the `mentions` table.
//!
//! The upsert is the ingestion pipeline's write path: keyed `(id, user_id)`,
//! it overwrites content/author/sentiment/url/engagement on conflict so
//! re-ingesting the same URL leaves exactly one row per owner. There is no
//! transactional batching across the mentions of one request; concurrent
//! ingestions race last-write-wins per key.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use brandmon_core::{Engagement, Mention, Platform, Sentiment};

use crate::DbError;

/// A row from the `mentions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MentionRow {
    pub id: String,
    pub user_id: Uuid,
    pub content: String,
    pub platform: String,
    pub author: String,
    pub sentiment: String,
    pub url: Option<String>,
    pub engagement: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MentionRow {
    /// Converts the row back into the wire-facing [`Mention`] shape.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Decode`] if the stored platform, sentiment or
    /// engagement blob no longer parses.
    pub fn into_mention(self) -> Result<Mention, DbError> {
        let platform = self
            .platform
            .parse::<Platform>()
            .map_err(|e| DbError::Decode(e.to_string()))?;
        let sentiment = self
            .sentiment
            .parse::<Sentiment>()
            .map_err(DbError::Decode)?;
        let engagement = self
            .engagement
            .map(serde_json::from_value::<Engagement>)
            .transpose()
            .map_err(|e| DbError::Decode(format!("engagement blob: {e}")))?;

        Ok(Mention {
            id: self.id,
            content: self.content,
            platform,
            author: self.author,
            sentiment,
            url: self.url,
            engagement,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Creates or updates a mention keyed `(id, user_id)`.
///
/// On conflict, content/author/sentiment/url/engagement are overwritten and
/// `updated_at` is bumped; the original `created_at` is preserved.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_mention(
    pool: &PgPool,
    user_id: Uuid,
    mention: &Mention,
) -> Result<MentionRow, DbError> {
    let engagement = mention
        .engagement
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| DbError::Decode(format!("engagement blob: {e}")))?;

    let row = sqlx::query_as::<_, MentionRow>(
        "INSERT INTO mentions \
           (id, user_id, content, platform, author, sentiment, url, engagement, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW()) \
         ON CONFLICT (id, user_id) DO UPDATE \
         SET content    = EXCLUDED.content, \
             author     = EXCLUDED.author, \
             sentiment  = EXCLUDED.sentiment, \
             url        = EXCLUDED.url, \
             engagement = EXCLUDED.engagement, \
             updated_at = NOW() \
         RETURNING id, user_id, content, platform, author, sentiment, url, engagement, created_at, updated_at",
    )
    .bind(&mention.id)
    .bind(user_id)
    .bind(&mention.content)
    .bind(mention.platform.as_str())
    .bind(&mention.author)
    .bind(mention.sentiment.as_str())
    .bind(&mention.url)
    .bind(engagement)
    .bind(mention.created_at)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Inserts a manually-submitted mention; fails on a duplicate key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn create_mention(
    pool: &PgPool,
    user_id: Uuid,
    mention: &Mention,
) -> Result<MentionRow, DbError> {
    let engagement = mention
        .engagement
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| DbError::Decode(format!("engagement blob: {e}")))?;

    let row = sqlx::query_as::<_, MentionRow>(
        "INSERT INTO mentions \
           (id, user_id, content, platform, author, sentiment, url, engagement, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW()) \
         RETURNING id, user_id, content, platform, author, sentiment, url, engagement, created_at, updated_at",
    )
    .bind(&mention.id)
    .bind(user_id)
    .bind(&mention.content)
    .bind(mention.platform.as_str())
    .bind(&mention.author)
    .bind(mention.sentiment.as_str())
    .bind(&mention.url)
    .bind(engagement)
    .bind(mention.created_at)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns all of one user's mentions, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_mentions_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<MentionRow>, DbError> {
    let rows = sqlx::query_as::<_, MentionRow>(
        "SELECT id, user_id, content, platform, author, sentiment, url, engagement, created_at, updated_at \
         FROM mentions \
         WHERE user_id = $1 \
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Deletes the given mention ids for one user and returns how many rows went
/// away. Owner scoping means a user can only delete their own rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_mentions(pool: &PgPool, user_id: Uuid, ids: &[String]) -> Result<u64, DbError> {
    let result = sqlx::query(
        "DELETE FROM mentions \
         WHERE user_id = $1 AND id = ANY($2)",
    )
    .bind(user_id)
    .bind(ids)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
