use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use brandmon_search::{
    FacebookSearch, GoogleSearchClient, RedditSearch, SearchOrchestrator, TwitterSearch,
};

use super::*;
use crate::middleware::AuthState;

const TEST_SALT: &str = "test-salt";

/// Clients with no credentials: every search path serves mock data without
/// touching the network.
fn offline_search_clients() -> SearchClients {
    SearchClients {
        orchestrator: SearchOrchestrator::without_provider(),
        twitter: TwitterSearch::with_base_url(None, 5, "brandmon/test", "http://localhost:1")
            .expect("twitter client"),
        reddit: RedditSearch::with_base_urls(
            None,
            5,
            "brandmon/test",
            "http://localhost:1",
            "http://localhost:1",
        )
        .expect("reddit client"),
        facebook: FacebookSearch::with_base_url(None, 5, "brandmon/test", "http://localhost:1")
            .expect("facebook client"),
    }
}

fn test_app(pool: sqlx::PgPool, search: SearchClients) -> axum::Router {
    let auth = AuthState::new(pool.clone(), TEST_SALT);
    build_app(
        AppState {
            pool,
            search: Arc::new(search),
            api_key_salt: TEST_SALT.to_string(),
        },
        auth,
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json parse")
}

/// Registers a user through the API and returns their API key.
async fn register_user(app: &axum::Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    "{{\"email\":\"{email}\",\"name\":\"Test User\"}}"
                )))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["apiKey"]
        .as_str()
        .expect("apiKey in response")
        .to_string()
}

fn authed_get(uri: &str, api_key: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {api_key}"))
        .body(Body::empty())
        .expect("request")
}

// ---------------------------------------------------------------------------
// Auth boundary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unauthenticated_search_is_refused_and_persists_nothing(pool: sqlx::PgPool) {
    let app = test_app(pool.clone(), offline_search_clients());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/search?keyword=widget")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mentions")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 0, "refused request must not persist anything");
}

#[sqlx::test(migrations = "../../migrations")]
async fn wrong_api_key_is_refused(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    register_user(&app, "owner@example.com").await;

    let response = app
        .oneshot(authed_get("/api/v1/mentions", "bm_not_a_real_key"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_email_registration_conflicts(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    register_user(&app, "dup@example.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    "{\"email\":\"dup@example.com\",\"name\":\"Another\"}",
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Search ingestion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn search_without_keyword_is_bad_request(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "kw@example.com").await;

    let response = app
        .oneshot(authed_get("/api/v1/search", &key))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn search_with_unknown_platform_is_bad_request(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "tiktok@example.com").await;

    let response = app
        .oneshot(authed_get(
            "/api/v1/search?keyword=widget&platform=tiktok",
            &key,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn mock_search_persists_a_structurally_valid_batch(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "mock@example.com").await;

    let response = app
        .clone()
        .oneshot(authed_get(
            "/api/v1/search?keyword=widget&platform=twitter",
            &key,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 5, "mock batch is exactly 5 mentions");
    assert_eq!(json["stats"]["total"], 5);
    assert_eq!(json["stats"]["byPlatform"]["twitter"], 5);

    for mention in data {
        assert_eq!(mention["platform"], "twitter");
        let sentiment = mention["sentiment"].as_str().expect("sentiment");
        assert!(["positive", "neutral", "negative"].contains(&sentiment));
        assert!(mention["content"]
            .as_str()
            .expect("content")
            .contains("widget"));
        assert!(!mention["author"].as_str().expect("author").is_empty());
    }

    // The batch is persisted for the owner.
    let listed = app
        .oneshot(authed_get("/api/v1/mentions", &key))
        .await
        .expect("response");
    let listed = body_json(listed).await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(5));
}

#[sqlx::test(migrations = "../../migrations")]
async fn cross_platform_search_reports_stats_for_all_platforms(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "all@example.com").await;

    let response = app
        .oneshot(authed_get("/api/v1/search?keyword=widget", &key))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["stats"]["total"], 20);
    for platform in ["twitter", "reddit", "facebook", "news"] {
        assert_eq!(json["stats"]["byPlatform"][platform], 5, "{platform}");
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn provider_failure_still_answers_success_with_zero_stats(pool: sqlx::PgPool) {
    // A provider that always fails: the twitter branch yields an empty list
    // rather than aborting the request.
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider =
        GoogleSearchClient::with_base_url("k", "cx", 5, "brandmon/test", &server.uri())
            .expect("provider");
    let mut clients = offline_search_clients();
    clients.orchestrator = SearchOrchestrator::with_provider(provider);

    let app = test_app(pool, clients);
    let key = register_user(&app, "outage@example.com").await;

    let response = app
        .oneshot(authed_get(
            "/api/v1/search?keyword=widget&platform=twitter",
            &key,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["stats"]["total"], 0);
    assert_eq!(json["stats"]["byPlatform"]["twitter"], 0);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
}

#[sqlx::test(migrations = "../../migrations")]
async fn reingesting_overwrites_instead_of_duplicating(pool: sqlx::PgPool) {
    // Same provider result twice: one row per (id, owner), second ingestion
    // wins.
    let server = wiremock::MockServer::start().await;
    let body = serde_json::json!({
        "items": [
            {
                "title": "Jane Doe on X",
                "link": "https://x.com/janedoe/status/1234567890",
                "snippet": "I love widget, it's the best!"
            }
        ]
    });
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider =
        GoogleSearchClient::with_base_url("k", "cx", 5, "brandmon/test", &server.uri())
            .expect("provider");
    let mut clients = offline_search_clients();
    clients.orchestrator = SearchOrchestrator::with_provider(provider);

    let app = test_app(pool, clients);
    let key = register_user(&app, "idempotent@example.com").await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(authed_get(
                "/api/v1/search?keyword=widget&platform=twitter",
                &key,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let listed = app
        .oneshot(authed_get("/api/v1/mentions", &key))
        .await
        .expect("response");
    let listed = body_json(listed).await;
    let data = listed["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1, "re-ingestion must not duplicate");
    assert_eq!(data[0]["id"], "twitter-1234567890");
    assert_eq!(data[0]["sentiment"], "positive");
    assert_eq!(data[0]["author"], "Jane Doe");
}

// ---------------------------------------------------------------------------
// Plain record endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn setup_filters_blank_keywords_and_round_trips(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "setup@example.com").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/setup")
                .header(header::AUTHORIZATION, format!("Bearer {key}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    "{\"keywords\":[\"widget\",\"  \",\"gadget\"]}",
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["keywords"], serde_json::json!(["widget", "gadget"]));

    let fetched = app
        .oneshot(authed_get("/api/v1/setup", &key))
        .await
        .expect("response");
    let fetched = body_json(fetched).await;
    assert_eq!(
        fetched["data"]["keywords"],
        serde_json::json!(["widget", "gadget"])
    );
    assert_eq!(fetched["data"]["domains"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn competitor_creation_requires_a_name(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "comp@example.com").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/competitors")
                .header(header::AUTHORIZATION, format!("Bearer {key}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"website\":\"https://rival.example.com\"}"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/competitors")
                .header(header::AUTHORIZATION, format!("Bearer {key}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    "{\"name\":\"Rival Co\",\"keywords\":[\"rival\"]}",
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Rival Co");
    assert_eq!(json["data"]["marketShare"], 0.0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn manual_mention_create_and_bulk_delete(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let key = register_user(&app, "manual@example.com").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/mentions")
                .header(header::AUTHORIZATION, format!("Bearer {key}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    "{\"content\":\"widget rocks\",\"platform\":\"twitter\",\
                     \"author\":\"@fan\",\"sentiment\":\"positive\"}",
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/mentions")
                .header(header::AUTHORIZATION, format!("Bearer {key}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!("{{\"ids\":[\"{id}\"]}}")))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn health_reports_database_ok(pool: sqlx::PgPool) {
    let app = test_app(pool, offline_search_clients());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], "ok");
}
