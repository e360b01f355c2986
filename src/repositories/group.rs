//! GroupRepository - Repository for groups and their members

use super::{PoolType, Read};
use crate::entities::{Group, GroupUser};
use sqlx::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub struct GroupRepository {
    connection_pool: PoolType,
}

impl GroupRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// All groups the user belongs to
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Vec<Group>, Error> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT g."id", g."name", g."meetingLink", g."createdAt", g."updatedAt"
            FROM groups g
            INNER JOIN group_users gu ON gu."groupId" = g."id"
            WHERE gu."userId" = $1
            ORDER BY g."createdAt" ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("User belongs to {} groups", groups.len());
        Ok(groups)
    }

    #[instrument(skip(self), fields(group_id = %group_id))]
    pub async fn find_memberships(&self, group_id: &Uuid) -> Result<Vec<GroupUser>, Error> {
        sqlx::query_as::<_, GroupUser>(
            r#"SELECT "id", "groupId", "userId" FROM group_users WHERE "groupId" = $1"#,
        )
        .bind(group_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    #[instrument(skip(self), fields(group_id = %group_id, user_id = %user_id))]
    pub async fn is_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, Error> {
        let found: Option<(Uuid,)> = sqlx::query_as(
            r#"SELECT "id" FROM group_users WHERE "groupId" = $1 AND "userId" = $2"#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(found.is_some())
    }

    /// Stores a fresh meeting link; bumps `updatedAt`, which dates the link
    #[instrument(skip(self, meeting_link), fields(group_id = %group_id))]
    pub async fn update_meeting_link(&self, group_id: &Uuid, meeting_link: &str) -> Result<(), Error> {
        let result = sqlx::query(
            r#"UPDATE groups SET "meetingLink" = $1, "updatedAt" = NOW() WHERE "id" = $2"#,
        )
        .bind(meeting_link)
        .bind(group_id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        info!("Meeting link stored");
        Ok(())
    }
}

impl Read<Group, Uuid> for GroupRepository {
    #[instrument(skip(self), fields(group_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<Group>, Error> {
        sqlx::query_as::<_, Group>(
            r#"SELECT "id", "name", "meetingLink", "createdAt", "updatedAt" FROM groups WHERE "id" = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
