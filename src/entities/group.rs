//! Group entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: Option<String>,
    #[sqlx(rename = "meetingLink")]
    pub meeting_link: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    // also marks when the current meeting link was stored
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct GroupUser {
    pub id: Uuid,
    #[sqlx(rename = "groupId")]
    pub group_id: Uuid,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
}
