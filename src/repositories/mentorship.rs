//! MentorshipRepository - Repository for mentor/mentee pairings

use super::{PoolType, Read};
use crate::entities::Mentorship;
use sqlx::Error;
use tracing::instrument;
use uuid::Uuid;

pub struct MentorshipRepository {
    connection_pool: PoolType,
}

impl MentorshipRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Mentorships where the user is either the mentor or the mentee
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn find_by_participant(&self, user_id: &Uuid) -> Result<Vec<Mentorship>, Error> {
        sqlx::query_as::<_, Mentorship>(
            r#"
            SELECT "id", "mentorId", "menteeId", "transactional", "endsAt", "createdAt"
            FROM "Mentorships"
            WHERE "mentorId" = $1 OR "menteeId" = $1
            ORDER BY "createdAt" ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Read<Mentorship, Uuid> for MentorshipRepository {
    #[instrument(skip(self), fields(mentorship_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Mentorship>, Error> {
        sqlx::query_as::<_, Mentorship>(
            r#"
            SELECT "id", "mentorId", "menteeId", "transactional", "endsAt", "createdAt"
            FROM "Mentorships"
            WHERE "id" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
