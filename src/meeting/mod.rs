//! Meeting module - Client for the third-party video-conferencing API
//!
//! Groups get their meeting link from Tencent Meeting. The client signs every
//! request with the application's secret key, see [`tencent::sign`].

pub mod tencent;

pub use tencent::{TencentMeetingClient, TencentMeetingConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeetingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Meeting API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Expected exactly one meeting in the response, got {0}")]
    UnexpectedMeetingCount(usize),

    #[error("Meeting API is not configured: {0}")]
    NotConfigured(&'static str),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MeetingInfo {
    #[serde(default)]
    pub subject: String,
    pub meeting_id: String,
    #[serde(default)]
    pub meeting_code: String,
    pub join_url: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateMeetingResponse {
    #[serde(default)]
    pub meeting_number: u32,
    pub meeting_info_list: Vec<MeetingInfo>,
}

impl CreateMeetingResponse {
    /// The join URL of the single meeting the provider created
    pub fn single_join_url(self) -> Result<String, MeetingError> {
        let count = self.meeting_info_list.len();
        match <[MeetingInfo; 1]>::try_from(self.meeting_info_list) {
            Ok([info]) => Ok(info.join_url),
            Err(_) => Err(MeetingError::UnexpectedMeetingCount(count)),
        }
    }
}
