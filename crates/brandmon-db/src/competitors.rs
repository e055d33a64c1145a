//! Database operations for the `competitors` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `competitors` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompetitorRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub keywords: Vec<String>,
    pub mentions: serde_json::Value,
    pub sentiment: serde_json::Value,
    pub market_share: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a competitor. Summaries start empty and
/// market share at zero.
#[derive(Debug, Clone)]
pub struct NewCompetitor {
    pub name: String,
    pub website: Option<String>,
    pub keywords: Vec<String>,
}

/// Creates a competitor for a user and returns the full row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn create_competitor(
    pool: &PgPool,
    user_id: Uuid,
    new: &NewCompetitor,
) -> Result<CompetitorRow, DbError> {
    let row = sqlx::query_as::<_, CompetitorRow>(
        "INSERT INTO competitors (user_id, name, website, keywords) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, user_id, name, website, keywords, mentions, sentiment, market_share, \
                   created_at, updated_at",
    )
    .bind(user_id)
    .bind(&new.name)
    .bind(&new.website)
    .bind(&new.keywords)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns all of one user's competitors, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_competitors(pool: &PgPool, user_id: Uuid) -> Result<Vec<CompetitorRow>, DbError> {
    let rows = sqlx::query_as::<_, CompetitorRow>(
        "SELECT id, user_id, name, website, keywords, mentions, sentiment, market_share, \
                created_at, updated_at \
         FROM competitors \
         WHERE user_id = $1 \
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
