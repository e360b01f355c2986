//! User entity

use super::enums::Roles;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub pinyin: Option<String>,
    pub email: String,
    /// Identifier of the user at the external identity provider
    #[sqlx(rename = "clientId")]
    pub client_id: String,
    #[sqlx(try_from = "Vec<String>")]
    pub roles: Roles,
    #[sqlx(rename = "consentFormAcceptedAt")]
    pub consent_form_accepted_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
