//! Database operations for the `monitoring_items` table (one row per user).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `monitoring_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonitoringItemsRow {
    pub user_id: Uuid,
    pub domains: Vec<String>,
    pub brand_names: Vec<String>,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Replaces a user's tracked keyword list, creating the row on first use.
/// Domains and brand names are left untouched on update.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_keywords(
    pool: &PgPool,
    user_id: Uuid,
    keywords: &[String],
) -> Result<MonitoringItemsRow, DbError> {
    let row = sqlx::query_as::<_, MonitoringItemsRow>(
        "INSERT INTO monitoring_items (user_id, keywords) \
         VALUES ($1, $2) \
         ON CONFLICT (user_id) DO UPDATE \
         SET keywords = EXCLUDED.keywords, updated_at = NOW() \
         RETURNING user_id, domains, brand_names, keywords, created_at, updated_at",
    )
    .bind(user_id)
    .bind(keywords)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns a user's monitoring items, or `None` before first setup.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_monitoring_items(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<MonitoringItemsRow>, DbError> {
    let row = sqlx::query_as::<_, MonitoringItemsRow>(
        "SELECT user_id, domains, brand_names, keywords, created_at, updated_at \
         FROM monitoring_items \
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
