use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The authenticated owner of the request, resolved from the bearer key and
/// stored as a request extension. Every protected handler reads this.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Auth settings used by middleware: the pool to resolve keys against and
/// the salt applied before hashing.
#[derive(Clone)]
pub struct AuthState {
    pool: PgPool,
    salt: String,
}

impl AuthState {
    #[must_use]
    pub fn new(pool: PgPool, salt: &str) -> Self {
        Self {
            pool,
            salt: salt.to_owned(),
        }
    }
}

/// Salted SHA-256 of an API key, hex-encoded. Keys are stored and looked up
/// only in this form.
#[must_use]
pub fn hash_api_key(salt: &str, key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(key.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    success: bool,
    error: &'static str,
}

fn unauthorized(message: &'static str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(MiddlewareErrorBody {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware that fails closed: requests without a bearer key resolving to
/// a user are refused before any search or persistence work happens.
pub async fn require_user_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(req.headers().get(AUTHORIZATION)) else {
        return unauthorized("not authenticated");
    };

    let hash = hash_api_key(&auth.salt, token);
    match brandmon_db::find_user_by_api_key_hash(&auth.pool, &hash).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(AuthUser(user.id));
            next.run(req).await
        }
        Ok(None) => unauthorized("invalid API key"),
        Err(error) => {
            tracing::error!(error = %error, "auth lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MiddlewareErrorBody {
                    success: false,
                    error: "server error",
                }),
            )
                .into_response()
        }
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn extract_bearer_token_rejects_blank_token() {
        let header = HeaderValue::from_static("Bearer   ");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn hash_api_key_is_stable_and_salted() {
        let a = hash_api_key("salt", "key");
        let b = hash_api_key("salt", "key");
        let c = hash_api_key("other-salt", "key");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64, "hex-encoded SHA-256");
    }
}
