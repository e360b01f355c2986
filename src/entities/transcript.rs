//! Transcript and Summary entities - derived records of recorded meetings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Transcript {
    #[sqlx(rename = "transcriptId")]
    pub transcript_id: String,
    #[sqlx(rename = "groupId")]
    pub group_id: Uuid,
    #[sqlx(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    #[sqlx(rename = "endedAt")]
    pub ended_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Summary {
    #[sqlx(rename = "transcriptId")]
    pub transcript_id: String,
    #[sqlx(rename = "summaryKey")]
    pub summary_key: String,
    pub summary: String,
}
