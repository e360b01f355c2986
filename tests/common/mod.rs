#![allow(dead_code)]

pub use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use mentorship::core::AppState;
use mentorship::meeting::{TencentMeetingClient, TencentMeetingConfig};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret-that-only-tests-use";
pub const INTEGRATION_TOKEN: &str = "integration-test-token";

// Fixture ids, see fixtures/*.sql
pub const ZHANGSAN: &str = "00000000-0000-0000-0000-000000000001"; // UserManager
pub const LISI: &str = "00000000-0000-0000-0000-000000000002"; // no roles
pub const WANGWU: &str = "00000000-0000-0000-0000-000000000003"; // MentorCoach
pub const ZHAOLIU: &str = "00000000-0000-0000-0000-000000000004"; // GroupManager
pub const FRESH_GROUP: &str = "10000000-0000-0000-0000-000000000001";
pub const STALE_GROUP: &str = "10000000-0000-0000-0000-000000000002";
pub const EMPTY_GROUP: &str = "10000000-0000-0000-0000-000000000003";
pub const MENTORSHIP: &str = "30000000-0000-0000-0000-000000000001";

/// Builds an AppState for the tests
///
/// # Arguments
/// * `pool` - Postgres connection pool
/// * `meeting_api_base` - Base URL of the meeting provider; `None` leaves it unconfigured
pub fn create_test_state(pool: PgPool, meeting_api_base: Option<String>) -> Arc<AppState> {
    let meeting_config = match meeting_api_base {
        Some(api_base) => TencentMeetingConfig {
            api_base,
            secret_id: "sid".to_string(),
            secret_key: "skey".to_string(),
            app_id: "app".to_string(),
            sdk_id: "sdk".to_string(),
            admin_user_id: "admin".to_string(),
        },
        None => TencentMeetingConfig::default(),
    };
    let meeting = TencentMeetingClient::new(meeting_config).expect("meeting client");
    Arc::new(AppState::new(
        pool,
        meeting,
        JWT_SECRET.to_string(),
        Some(INTEGRATION_TOKEN.to_string()),
        Duration::from_secs(60),
    ))
}

/// AppState on a pool that never connects, for paths that stop before the database
pub fn create_lazy_state(integration_token: Option<&str>) -> Arc<AppState> {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://nobody@127.0.0.1:1/nothing")
        .expect("valid database url");
    let meeting =
        TencentMeetingClient::new(TencentMeetingConfig::default()).expect("meeting client");
    Arc::new(AppState::new(
        pool,
        meeting,
        JWT_SECRET.to_string(),
        integration_token.map(str::to_string),
        Duration::from_secs(60),
    ))
}

/// Builds a TestServer around the application router
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = mentorship::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// `Authorization` header value with a valid 24h token for the user
pub fn bearer_for(user_id: &str) -> String {
    let id: Uuid = user_id.parse().expect("valid uuid");
    let token = mentorship::auth::encode_jwt(id, format!("client-{}", user_id), JWT_SECRET)
        .expect("Failed to create JWT token");
    format!("Bearer {}", token)
}

/// Starts a fake meeting provider answering `POST /v1/meetings` with one
/// meeting per join URL, and returns its base URL
pub async fn spawn_meeting_mock(join_urls: &[&str]) -> String {
    use axum::{Json, Router, routing::post};
    use serde_json::json;

    let meetings: Vec<serde_json::Value> = join_urls
        .iter()
        .enumerate()
        .map(|(i, url)| json!({ "meeting_id": format!("meeting-{}", i), "join_url": url }))
        .collect();
    let body = json!({
        "meeting_number": meetings.len(),
        "meeting_info_list": meetings,
    });

    let router = Router::new().route(
        "/v1/meetings",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{}", addr)
}
