//! TranscriptRepository - Repository for meeting transcripts

use super::{PoolType, Read};
use crate::entities::Transcript;
use chrono::{DateTime, Utc};
use sqlx::Error;
use tracing::instrument;
use uuid::Uuid;

pub struct TranscriptRepository {
    connection_pool: PoolType,
}

impl TranscriptRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self), fields(group_id = %group_id))]
    pub async fn find_by_group_id(&self, group_id: &Uuid) -> Result<Vec<Transcript>, Error> {
        sqlx::query_as::<_, Transcript>(
            r#"
            SELECT "transcriptId", "groupId", "startedAt", "endedAt"
            FROM "Transcripts"
            WHERE "groupId" = $1
            ORDER BY "startedAt" ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// `None` when the group has no transcript
    #[instrument(skip(self), fields(group_id = %group_id))]
    pub async fn max_started_at(&self, group_id: &Uuid) -> Result<Option<DateTime<Utc>>, Error> {
        let (max,): (Option<DateTime<Utc>>,) =
            sqlx::query_as(r#"SELECT MAX("startedAt") FROM "Transcripts" WHERE "groupId" = $1"#)
                .bind(group_id)
                .fetch_one(&self.connection_pool)
                .await?;
        Ok(max)
    }
}

impl Read<Transcript, String> for TranscriptRepository {
    #[instrument(skip(self), fields(transcript_id = %id))]
    async fn read(&self, id: &String) -> Result<Option<Transcript>, Error> {
        sqlx::query_as::<_, Transcript>(
            r#"
            SELECT "transcriptId", "groupId", "startedAt", "endedAt"
            FROM "Transcripts"
            WHERE "transcriptId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups")))]
    async fn test_max_started_at(pool: PgPool) -> sqlx::Result<()> {
        let repo = TranscriptRepository::new(pool);

        let with_transcripts: Uuid = "10000000-0000-0000-0000-000000000001".parse().unwrap();
        let latest = repo.max_started_at(&with_transcripts).await?.unwrap();
        assert_eq!(latest.to_rfc3339(), "2024-04-01T10:00:00+00:00");

        let empty: Uuid = "10000000-0000-0000-0000-000000000003".parse().unwrap();
        assert!(repo.max_started_at(&empty).await?.is_none());
        Ok(())
    }
}
