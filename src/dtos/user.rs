//! User DTOs

use crate::entities::{Role, Roles, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Full profile as seen by the user themselves and by user managers
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserProfileDTO {
    pub id: Uuid,
    pub name: Option<String>,
    pub pinyin: Option<String>,
    pub email: String,
    pub roles: Roles,
    pub consent_form_accepted_at: Option<DateTime<Utc>>,
}

impl From<User> for UserProfileDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            pinyin: value.pinyin,
            email: value.email,
            roles: value.roles,
            consent_form_accepted_at: value.consent_form_accepted_at,
        }
    }
}

/// Minimal user info visible to other users
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicUserDTO {
    pub id: Uuid,
    pub name: Option<String>,
}

impl From<User> for PublicUserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SearchUsersResponseDTO {
    pub users: Vec<PublicUserDTO>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub pinyin: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub client_id: String,
    #[validate(length(min = 1, message = "required"))]
    pub roles: Vec<Role>,
}

/// Profile fields accepted by `PUT /users/{user_id}`.
/// `roles` and `email` are ignored unless the caller is a user manager.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateUserDTO {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub consent_form_accepted_at: Option<DateTime<Utc>>,
}

/// Columns written by a profile update, after permission filtering
#[derive(Debug, Clone, Default)]
pub struct UserChangesDTO {
    pub name: String,
    pub pinyin: String,
    pub consent_form_accepted_at: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub roles: Option<Vec<Role>>,
}
