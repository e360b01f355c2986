//! Tencent Meeting REST client

use super::{CreateMeetingResponse, MeetingError};
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const CREATE_MEETING_PATH: &str = "/v1/meetings";

#[derive(Debug, Clone, Default)]
pub struct TencentMeetingConfig {
    pub api_base: String,
    pub secret_id: String,
    pub secret_key: String,
    pub app_id: String,
    pub sdk_id: String,
    /// Account that owns the created meetings
    pub admin_user_id: String,
}

#[derive(Serialize, Debug)]
struct CreateMeetingRequest<'a> {
    userid: &'a str,
    instanceid: u32,
    subject: &'a str,
    #[serde(rename = "type")]
    meeting_type: u32,
    start_time: String,
    end_time: String,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error_info: ApiErrorInfo,
}

#[derive(Deserialize, Debug)]
struct ApiErrorInfo {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

/// Request signature: base64 of the hex HMAC-SHA256 over
/// `X-TC-Key=..&X-TC-Nonce=..&X-TC-Timestamp=..\n{method}\n{uri}\n{body}`
pub fn sign(
    secret_id: &str,
    secret_key: &str,
    nonce: &str,
    timestamp: &str,
    method: &str,
    uri: &str,
    body: &str,
) -> String {
    let header_string = format!(
        "X-TC-Key={}&X-TC-Nonce={}&X-TC-Timestamp={}",
        secret_id, nonce, timestamp
    );
    let to_sign = format!("{}\n{}\n{}\n{}", header_string, method, uri, body);

    let mut mac = Hmac::<Sha256>::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(to_sign.as_bytes());

    STANDARD.encode(hex::encode(mac.finalize().into_bytes()))
}

pub struct TencentMeetingClient {
    config: TencentMeetingConfig,
    http: Client,
}

impl TencentMeetingClient {
    pub fn new(config: TencentMeetingConfig) -> Result<Self, MeetingError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("mentorship/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, http })
    }

    /// Creates a scheduled meeting between `start` and `end` (unix seconds)
    #[instrument(skip(self))]
    pub async fn create_meeting(
        &self,
        subject: &str,
        start: i64,
        end: i64,
    ) -> Result<CreateMeetingResponse, MeetingError> {
        if self.config.secret_id.is_empty() || self.config.secret_key.is_empty() {
            return Err(MeetingError::NotConfigured("TM_SECRET_ID / TM_SECRET_KEY"));
        }

        let body = serde_json::to_string(&CreateMeetingRequest {
            userid: &self.config.admin_user_id,
            instanceid: 1,
            subject,
            meeting_type: 0,
            start_time: start.to_string(),
            end_time: end.to_string(),
        })?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let nonce = rand::random::<u32>().to_string();
        let signature = sign(
            &self.config.secret_id,
            &self.config.secret_key,
            &nonce,
            &timestamp,
            "POST",
            CREATE_MEETING_PATH,
            &body,
        );

        let url = format!(
            "{}{}",
            self.config.api_base.trim_end_matches('/'),
            CREATE_MEETING_PATH
        );
        debug!("Creating meeting at {}", url);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-TC-Key", &self.config.secret_id)
            .header("X-TC-Timestamp", &timestamp)
            .header("X-TC-Nonce", &nonce)
            .header("X-TC-Signature", signature)
            .header("AppId", &self.config.app_id)
            .header("SdkId", &self.config.sdk_id)
            .header("X-TC-Registered", "1")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(parsed) => format!(
                    "{} (code {})",
                    parsed.error_info.message, parsed.error_info.error_code
                ),
                Err(_) => text,
            };
            error!("Meeting API rejected request: {} {}", status, message);
            return Err(MeetingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CreateMeetingResponse = serde_json::from_str(&text)?;
        info!("Meeting created ({} returned)", parsed.meeting_info_list.len());
        Ok(parsed)
    }
}
