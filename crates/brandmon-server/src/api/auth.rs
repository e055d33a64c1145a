use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::hash_api_key;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RegisterRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    /// Returned exactly once; only the salted hash is stored.
    pub api_key: String,
}

/// Creates an account and mints its API key.
pub(super) async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredUser>>), ApiError> {
    let email = body.email.trim();
    let name = body.name.trim();
    if email.is_empty() || name.is_empty() {
        return Err(ApiError::bad_request("email and name are required"));
    }

    let api_key = format!("bm_{}", Uuid::new_v4().simple());
    let api_key_hash = hash_api_key(&state.api_key_salt, &api_key);

    let user = brandmon_db::create_user(&state.pool, email, name, &api_key_hash)
        .await
        .map_err(|e| match &e {
            brandmon_db::DbError::Sqlx(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                ApiError::new("conflict", "email is already registered")
            }
            _ => map_db_error(&e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RegisteredUser {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            api_key,
        })),
    ))
}
