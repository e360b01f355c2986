//! Chat entities - rooms and their messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct ChatRoom {
    pub id: Uuid,
    // a room is owned by a mentorship when this is set
    #[sqlx(rename = "mentorshipId")]
    pub mentorship_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    #[sqlx(rename = "roomId")]
    pub room_id: Uuid,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    pub markdown: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
