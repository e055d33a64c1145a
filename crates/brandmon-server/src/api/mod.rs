mod auth;
mod competitors;
mod mentions;
mod monitoring;
mod reports;
mod search;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use brandmon_core::AppConfig;
use brandmon_search::{
    FacebookSearch, RedditSearch, SearchError, SearchOrchestrator, TwitterSearch,
};

use crate::middleware::{request_id, require_user_auth, AuthState};

/// The outbound search clients, built once at startup and shared across
/// requests. Clients without credentials serve mock data.
pub struct SearchClients {
    pub orchestrator: SearchOrchestrator,
    pub twitter: TwitterSearch,
    pub reddit: RedditSearch,
    pub facebook: FacebookSearch,
}

impl SearchClients {
    /// Builds every outbound client from config.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Ok(Self {
            orchestrator: SearchOrchestrator::from_config(config)?,
            twitter: TwitterSearch::from_config(config)?,
            reddit: RedditSearch::from_config(config)?,
            facebook: FacebookSearch::from_config(config)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub search: Arc<SearchClients>,
    pub api_key_salt: String,
}

/// Success envelope: `{"success": true, "data": ...}`. The dashboard UI
/// keys off the `success` flag, so every response carries it.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error envelope: `{"success": false, "error": "..."}`, with the HTTP
/// status derived from the error code.
#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.message,
        });
        (status, Json(body)).into_response()
    }
}

pub(super) fn map_db_error(error: &brandmon_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::internal("server error")
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/search", get(search::cross_platform_search))
        .route(
            "/api/v1/search/{platform}",
            get(search::single_platform_search),
        )
        .route(
            "/api/v1/mentions",
            get(mentions::list_mentions)
                .post(mentions::create_mention)
                .delete(mentions::delete_mentions),
        )
        .route(
            "/api/v1/competitors",
            get(competitors::list_competitors).post(competitors::create_competitor),
        )
        .route(
            "/api/v1/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route(
            "/api/v1/setup",
            get(monitoring::get_setup).post(monitoring::update_setup),
        )
        .layer(axum::middleware::from_fn_with_state(auth, require_user_auth))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/auth/register", post(auth::register));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match brandmon_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::new(HealthData {
                status: "ok",
                database: "ok",
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::new(HealthData {
                    status: "degraded",
                    database: "unavailable",
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests;
