//! ChatRepository - Repository for chat rooms and messages

use super::{Create, PoolType};
use crate::entities::{ChatMessage, ChatRoom};
use sqlx::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Insert data of a chat message (id and timestamps are generated)
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub markdown: String,
}

pub struct ChatRepository {
    connection_pool: PoolType,
}

impl ChatRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self), fields(mentorship_id = %mentorship_id))]
    pub async fn find_room_by_mentorship(&self, mentorship_id: &Uuid) -> Result<Option<ChatRoom>, Error> {
        sqlx::query_as::<_, ChatRoom>(
            r#"SELECT "id", "mentorshipId" FROM "ChatRooms" WHERE "mentorshipId" = $1"#,
        )
        .bind(mentorship_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Returns the room of the mentorship, creating it on first use.
    /// The unique `mentorshipId` keeps concurrent callers on the same room.
    #[instrument(skip(self), fields(mentorship_id = %mentorship_id))]
    pub async fn get_or_create_room(&self, mentorship_id: &Uuid) -> Result<ChatRoom, Error> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO "ChatRooms" ("id", "mentorshipId") VALUES ($1, $2)
            ON CONFLICT ("mentorshipId") DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(mentorship_id)
        .execute(&self.connection_pool)
        .await?;

        if inserted.rows_affected() > 0 {
            info!("Chat room created");
        }

        self.find_room_by_mentorship(mentorship_id)
            .await?
            .ok_or(Error::RowNotFound)
    }

    /// Messages of a room, oldest first
    #[instrument(skip(self), fields(room_id = %room_id))]
    pub async fn list_messages(&self, room_id: &Uuid) -> Result<Vec<ChatMessage>, Error> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT "id", "roomId", "userId", "markdown", "createdAt"
            FROM "ChatMessages"
            WHERE "roomId" = $1
            ORDER BY "createdAt" ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} messages", messages.len());
        Ok(messages)
    }
}

impl Create<ChatMessage, NewChatMessage> for ChatRepository {
    #[instrument(skip(self, data), fields(room_id = %data.room_id, user_id = %data.user_id))]
    async fn create(&self, data: &NewChatMessage) -> Result<ChatMessage, Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO "ChatMessages" ("id", "roomId", "userId", "markdown")
            VALUES ($1, $2, $3, $4)
            RETURNING "id", "roomId", "userId", "markdown", "createdAt"
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.room_id)
        .bind(data.user_id)
        .bind(&data.markdown)
        .fetch_one(&self.connection_pool)
        .await
    }
}
