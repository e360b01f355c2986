//! Mentorship entity - pairing between a mentor and a mentee

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Mentorship {
    pub id: Uuid,
    #[sqlx(rename = "mentorId")]
    pub mentor_id: Uuid,
    #[sqlx(rename = "menteeId")]
    pub mentee_id: Uuid,
    pub transactional: bool,
    #[sqlx(rename = "endsAt")]
    pub ends_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Mentorship {
    pub fn is_participant(&self, user_id: &Uuid) -> bool {
        self.mentor_id == *user_id || self.mentee_id == *user_id
    }
}
