//! Database operations for the `users` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub api_key_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creates a new user with a pre-hashed API key and returns the full row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including unique constraint
/// violations on email or key hash).
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    display_name: &str,
    api_key_hash: &str,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (email, display_name, api_key_hash) \
         VALUES ($1, $2, $3) \
         RETURNING id, email, display_name, api_key_hash, created_at, updated_at",
    )
    .bind(email)
    .bind(display_name)
    .bind(api_key_hash)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Resolves a user by the salted hash of their API key, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_user_by_api_key_hash(
    pool: &PgPool,
    api_key_hash: &str,
) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, display_name, api_key_hash, created_at, updated_at \
         FROM users \
         WHERE api_key_hash = $1",
    )
    .bind(api_key_hash)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Looks up a user by email, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, display_name, api_key_hash, created_at, updated_at \
         FROM users \
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
