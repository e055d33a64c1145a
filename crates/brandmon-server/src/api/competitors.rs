use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandmon_db::{CompetitorRow, NewCompetitor};

use crate::middleware::AuthUser;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CreateCompetitorRequest {
    name: Option<String>,
    website: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CompetitorItem {
    id: Uuid,
    name: String,
    website: Option<String>,
    keywords: Vec<String>,
    mentions: serde_json::Value,
    sentiment: serde_json::Value,
    market_share: f32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompetitorRow> for CompetitorItem {
    fn from(row: CompetitorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            website: row.website,
            keywords: row.keywords,
            mentions: row.mentions,
            sentiment: row.sentiment,
            market_share: row.market_share,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `GET /api/v1/competitors` — the owner's competitors, newest first.
pub(super) async fn list_competitors(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<CompetitorItem>>>, ApiError> {
    let rows = brandmon_db::list_competitors(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(ApiResponse::new(
        rows.into_iter().map(CompetitorItem::from).collect(),
    )))
}

/// `POST /api/v1/competitors` — create with empty summaries and zero market
/// share.
pub(super) async fn create_competitor(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(body): Json<CreateCompetitorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompetitorItem>>), ApiError> {
    let Some(name) = body.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) else {
        return Err(ApiError::bad_request("name is required"));
    };

    let new = NewCompetitor {
        name,
        website: body.website,
        keywords: body.keywords,
    };
    let row = brandmon_db::create_competitor(&state.pool, user_id, &new)
        .await
        .map_err(|e| map_db_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CompetitorItem::from(row))),
    ))
}
