//! Integration tests of authentication, on routes that never reach the database
//!
//! - bearer token parsing and verification
//! - integration token guard of the migration endpoint

mod common;

#[cfg(test)]
mod auth_tests {
    use super::common::*;
    use mentorship::auth::encode_jwt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_root_is_public() {
        let server = create_test_server(create_lazy_state(None));
        let response = server.get("/").await;
        response.assert_status_ok();
        response.assert_text("Server is running!");
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let server = create_test_server(create_lazy_state(None));
        let response = server.get("/users/me").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_rejected() {
        let server = create_test_server(create_lazy_state(None));
        let response = server
            .get("/groups/mine")
            .add_header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let server = create_test_server(create_lazy_state(None));
        let response = server
            .get("/mentorships/mine")
            .add_header(AUTHORIZATION, "Bearer not-a-jwt")
            .await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Unable to decode token");
    }

    #[tokio::test]
    async fn test_token_signed_with_another_secret_is_rejected() {
        let server = create_test_server(create_lazy_state(None));
        let token = encode_jwt(Uuid::new_v4(), "client".to_string(), "some-other-secret").unwrap();
        let response = server
            .get("/users")
            .add_header(AUTHORIZATION, format!("Bearer {}", token))
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_migration_disabled_without_integration_token() {
        let server = create_test_server(create_lazy_state(None));
        let response = server
            .post("/migration/migrate_database")
            .add_header(AUTHORIZATION, "Bearer anything")
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_migration_rejects_wrong_integration_token() {
        let server = create_test_server(create_lazy_state(Some(INTEGRATION_TOKEN)));
        let response = server
            .post("/migration/migrate_database")
            .add_header(AUTHORIZATION, "Bearer wrong-token")
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_user_token_is_not_an_integration_token() {
        let server = create_test_server(create_lazy_state(Some(INTEGRATION_TOKEN)));
        let response = server
            .post("/migration/migrate_database")
            .add_header(AUTHORIZATION, bearer_for(ZHANGSAN))
            .await;
        response.assert_status_unauthorized();
    }
}
