//! Mentorship and chat DTOs

use crate::entities::{ChatMessage, Mentorship};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct MentorshipDTO {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub transactional: bool,
    pub ends_at: Option<DateTime<Utc>>,
}

impl From<Mentorship> for MentorshipDTO {
    fn from(value: Mentorship) -> Self {
        Self {
            id: value.id,
            mentor_id: value.mentor_id,
            mentee_id: value.mentee_id,
            transactional: value.transactional,
            ends_at: value.ends_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatMessageDTO {
    pub id: Uuid,
    pub user_id: Uuid,
    pub markdown: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDTO {
    fn from(value: ChatMessage) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            markdown: value.markdown,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateChatMessageDTO {
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Message content must be between 1 and 10000 characters"
    ))]
    pub markdown: String,
}
