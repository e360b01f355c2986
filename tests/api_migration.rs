//! Integration tests of the schema migration
//!
//! - POST /migration/migrate_database on a legacy database
//! - idempotence of the whole sequence

mod common;

#[cfg(test)]
mod migration_tests {
    use super::common::*;
    use sqlx::PgPool;

    const LEGACY_SCHEMA: &str = r#"
CREATE TABLE users (
    "id" UUID PRIMARY KEY,
    "name" TEXT,
    "pinyin" TEXT,
    "email" TEXT NOT NULL,
    "clientId" TEXT NOT NULL UNIQUE,
    "roles" TEXT[] NOT NULL DEFAULT '{}',
    "consentFormAcceptedAt" TIMESTAMPTZ,
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "deletedAt" TIMESTAMPTZ
);

CREATE TABLE groups (
    "id" UUID PRIMARY KEY,
    "name" TEXT,
    "meetingLink" TEXT,
    "coachingPartnershipId" UUID,
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "deletedAt" TIMESTAMPTZ
);

CREATE TABLE "Partnerships" (
    "id" UUID PRIMARY KEY,
    "mentorId" UUID NOT NULL REFERENCES users ("id"),
    "menteeId" UUID NOT NULL REFERENCES users ("id"),
    "coachId" UUID,
    "endedAt" TIMESTAMPTZ,
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE "InterviewFeedbackUpdateAttempts" (
    "id" SERIAL PRIMARY KEY,
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

INSERT INTO users ("id", "name", "email", "clientId", "roles", "deletedAt") VALUES
    ('00000000-0000-0000-0000-000000000001', '张三', 'zhangsan@ub.nd', 'c1', '{AdhocMentor,Mentor}', NULL),
    ('00000000-0000-0000-0000-000000000002', '李四', 'lisi@example.com', 'c2', '{}', NULL),
    ('00000000-0000-0000-0000-000000000003', '已删除', 'gone@example.com', 'c3', '{}', NOW());

INSERT INTO "Partnerships" ("id", "mentorId", "menteeId", "endedAt") VALUES
    ('30000000-0000-0000-0000-000000000001', '00000000-0000-0000-0000-000000000001',
     '00000000-0000-0000-0000-000000000002', '2024-01-01T00:00:00Z');

INSERT INTO "InterviewFeedbackUpdateAttempts" ("createdAt") VALUES
    (NOW() - INTERVAL '60 days'),
    (NOW());
"#;

    async fn column_exists(pool: &PgPool, table: &str, column: &str) -> sqlx::Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.columns \
             WHERE table_name = $1 AND column_name = $2)",
        )
        .bind(table)
        .bind(column)
        .fetch_one(pool)
        .await
    }

    #[sqlx::test(migrations = false)]
    async fn test_migrate_legacy_database(pool: PgPool) -> sqlx::Result<()> {
        sqlx::raw_sql(LEGACY_SCHEMA).execute(&pool).await?;
        let server = create_test_server(create_test_state(pool.clone(), None));

        let response = server
            .post("/migration/migrate_database")
            .add_header(AUTHORIZATION, format!("Bearer {}", INTEGRATION_TOKEN))
            .await;
        response.assert_status_ok();
        let report: serde_json::Value = response.json();
        let steps = report["completed_steps"].as_array().unwrap();
        assert_eq!(steps.first().unwrap(), "rename_Partnerships_to_Mentorships");
        assert_eq!(steps.last().unwrap(), "cleanup_feedback_attempt_logs");

        // Mentorships renamed and reshaped
        assert!(column_exists(&pool, "Mentorships", "endsAt").await?);
        assert!(!column_exists(&pool, "Mentorships", "endedAt").await?);
        assert!(!column_exists(&pool, "Mentorships", "relationalEndedAt").await?);
        assert!(!column_exists(&pool, "Mentorships", "coachId").await?);
        let transactional: bool =
            sqlx::query_scalar(r#"SELECT "transactional" FROM "Mentorships""#)
                .fetch_one(&pool)
                .await?;
        assert!(!transactional);

        // Soft-deleted rows gone, columns dropped
        assert!(!column_exists(&pool, "users", "deletedAt").await?);
        assert!(!column_exists(&pool, "groups", "deletedAt").await?);
        assert!(!column_exists(&pool, "groups", "coachingPartnershipId").await?);
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await?;
        assert_eq!(users, 2);

        // Data rewrites
        let (email, roles): (String, Vec<String>) = sqlx::query_as(
            r#"SELECT "email", "roles" FROM users WHERE "clientId" = 'c1'"#,
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(email, "zhangsan@f.ml");
        assert_eq!(roles, vec!["TransactionalMentor", "Mentor"]);

        let attempts: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM "InterviewFeedbackUpdateAttempts""#)
                .fetch_one(&pool)
                .await?;
        assert_eq!(attempts, 1);

        // New tables exist after the schema sync
        let rooms: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "ChatRooms""#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(rooms, 0);
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_migration_is_idempotent(pool: PgPool) -> sqlx::Result<()> {
        sqlx::raw_sql(LEGACY_SCHEMA).execute(&pool).await?;
        let state = create_test_state(pool.clone(), None);

        let first = state.migrator.migrate_database().await.unwrap();
        let second = state.migrator.migrate_database().await.unwrap();
        assert_eq!(first, second);

        let mentorships: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "Mentorships""#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(mentorships, 1);
        Ok(())
    }

    const OLD_USERS_TABLE: &str = r#"
CREATE TABLE users (
    "id" UUID PRIMARY KEY,
    "name" TEXT,
    "pinyin" TEXT,
    "email" TEXT NOT NULL,
    "clientId" TEXT NOT NULL UNIQUE,
    "roles" TEXT[] NOT NULL DEFAULT '{}'
);

INSERT INTO users ("id", "name", "pinyin", "email", "clientId", "roles") VALUES
    ('00000000-0000-0000-0000-000000000002', '李四', 'LISI', 'lisi@example.com', 'c2', '{}');
"#;

    #[sqlx::test(migrations = false)]
    async fn test_migration_adds_missing_columns(pool: PgPool) -> sqlx::Result<()> {
        sqlx::raw_sql(OLD_USERS_TABLE).execute(&pool).await?;
        assert!(!column_exists(&pool, "users", "consentFormAcceptedAt").await?);

        let state = create_test_state(pool.clone(), None);
        state.migrator.migrate_database().await.unwrap();

        for column in ["consentFormAcceptedAt", "createdAt", "updatedAt"] {
            assert!(column_exists(&pool, "users", column).await?, "{column} missing");
        }

        let server = create_test_server(state);
        let response = server
            .get("/users/me")
            .add_header(AUTHORIZATION, bearer_for(LISI))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "李四");
        assert!(body["consent_form_accepted_at"].is_null());
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_migration_lowercases_legacy_pinyin(pool: PgPool) -> sqlx::Result<()> {
        sqlx::raw_sql(OLD_USERS_TABLE).execute(&pool).await?;
        let state = create_test_state(pool.clone(), None);

        let report = state.migrator.migrate_database().await.unwrap();
        assert!(report.completed_steps.contains(&"normalize_pinyin_case".to_string()));

        let pinyin: Option<String> = sqlx::query_scalar(r#"SELECT "pinyin" FROM users"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(pinyin.as_deref(), Some("lisi"));
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_migrate_empty_database(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool.clone(), None);

        state.migrator.migrate_database().await.unwrap();

        assert!(column_exists(&pool, "Mentorships", "transactional").await?);
        assert!(column_exists(&pool, "users", "clientId").await?);
        Ok(())
    }
}
