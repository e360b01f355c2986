//! SummaryRepository - Repository for transcript summaries

use super::PoolType;
use crate::entities::Summary;
use sqlx::Error;
use tracing::instrument;

pub struct SummaryRepository {
    connection_pool: PoolType,
}

impl SummaryRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_transcript_id(&self, transcript_id: &str) -> Result<Vec<Summary>, Error> {
        sqlx::query_as::<_, Summary>(
            r#"
            SELECT "transcriptId", "summaryKey", "summary"
            FROM "Summaries"
            WHERE "transcriptId" = $1
            ORDER BY "summaryKey" ASC
            "#,
        )
        .bind(transcript_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}
