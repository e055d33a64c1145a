//! Database operations for the `reports` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `reports` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub report_type: String,
    pub data: serde_json::Value,
    pub period: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub report_type: String,
    pub data: serde_json::Value,
    pub period: Option<String>,
}

/// Creates a report for a user and returns the full row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn create_report(
    pool: &PgPool,
    user_id: Uuid,
    new: &NewReport,
) -> Result<ReportRow, DbError> {
    let row = sqlx::query_as::<_, ReportRow>(
        "INSERT INTO reports (user_id, title, report_type, data, period) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, user_id, title, report_type, data, period, created_at",
    )
    .bind(user_id)
    .bind(&new.title)
    .bind(&new.report_type)
    .bind(&new.data)
    .bind(&new.period)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns all of one user's reports, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reports(pool: &PgPool, user_id: Uuid) -> Result<Vec<ReportRow>, DbError> {
    let rows = sqlx::query_as::<_, ReportRow>(
        "SELECT id, user_id, title, report_type, data, period, created_at \
         FROM reports \
         WHERE user_id = $1 \
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
