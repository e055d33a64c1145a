use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandmon_db::{NewReport, ReportRow};

use crate::middleware::AuthUser;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CreateReportRequest {
    title: Option<String>,
    #[serde(rename = "type")]
    report_type: Option<String>,
    data: Option<serde_json::Value>,
    period: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReportItem {
    id: Uuid,
    title: String,
    #[serde(rename = "type")]
    report_type: String,
    data: serde_json::Value,
    period: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ReportRow> for ReportItem {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            report_type: row.report_type,
            data: row.data,
            period: row.period,
            created_at: row.created_at,
        }
    }
}

/// `GET /api/v1/reports` — the owner's reports, newest first.
pub(super) async fn list_reports(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<ReportItem>>>, ApiError> {
    let rows = brandmon_db::list_reports(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(ApiResponse::new(
        rows.into_iter().map(ReportItem::from).collect(),
    )))
}

/// `POST /api/v1/reports` — store a generated report blob.
pub(super) async fn create_report(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(body): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportItem>>), ApiError> {
    let (Some(title), Some(report_type)) = (body.title, body.report_type) else {
        return Err(ApiError::bad_request("title and type are required"));
    };

    let new = NewReport {
        title,
        report_type,
        data: body.data.unwrap_or_else(|| serde_json::json!({})),
        period: body.period,
    };
    let row = brandmon_db::create_report(&state.pool, user_id, &new)
        .await
        .map_err(|e| map_db_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ReportItem::from(row))),
    ))
}
