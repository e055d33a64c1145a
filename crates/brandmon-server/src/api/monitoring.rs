use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use brandmon_db::MonitoringItemsRow;

use crate::middleware::AuthUser;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SetupRequest {
    keywords: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MonitoringItems {
    domains: Vec<String>,
    brand_names: Vec<String>,
    keywords: Vec<String>,
}

impl From<MonitoringItemsRow> for MonitoringItems {
    fn from(row: MonitoringItemsRow) -> Self {
        Self {
            domains: row.domains,
            brand_names: row.brand_names,
            keywords: row.keywords,
        }
    }
}

/// `GET /api/v1/setup` — the owner's tracked items; empty lists before
/// first setup.
pub(super) async fn get_setup(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<MonitoringItems>>, ApiError> {
    let row = brandmon_db::get_monitoring_items(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(&e))?;

    let items = row.map(MonitoringItems::from).unwrap_or(MonitoringItems {
        domains: vec![],
        brand_names: vec![],
        keywords: vec![],
    });
    Ok(Json(ApiResponse::new(items)))
}

/// `POST /api/v1/setup` — replace the tracked keyword list. Blank entries
/// are filtered out; the row is created on first use.
pub(super) async fn update_setup(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(body): Json<SetupRequest>,
) -> Result<Json<ApiResponse<MonitoringItems>>, ApiError> {
    let Some(keywords) = body.keywords else {
        return Err(ApiError::bad_request("keywords must be a list"));
    };

    let filtered: Vec<String> = keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    let row = brandmon_db::upsert_keywords(&state.pool, user_id, &filtered)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(ApiResponse::new(MonitoringItems::from(row))))
}
