//! Transcript and summary DTOs

use crate::entities::{Summary, Transcript};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TranscriptDTO {
    pub transcript_id: String,
    pub group_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl From<Transcript> for TranscriptDTO {
    fn from(value: Transcript) -> Self {
        Self {
            transcript_id: value.transcript_id,
            group_id: value.group_id,
            started_at: value.started_at,
            ended_at: value.ended_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SummaryDTO {
    pub transcript_id: String,
    pub summary_key: String,
    pub summary: String,
}

impl From<Summary> for SummaryDTO {
    fn from(value: Summary) -> Self {
        Self {
            transcript_id: value.transcript_id,
            summary_key: value.summary_key,
            summary: value.summary,
        }
    }
}

/// `null` when the group has no transcript yet
#[derive(Serialize, Deserialize, Debug)]
pub struct MostRecentStartedAtDTO {
    pub started_at: Option<DateTime<Utc>>,
}
