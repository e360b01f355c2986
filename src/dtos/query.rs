//! Query DTOs

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /users/search`
#[derive(Serialize, Deserialize, Debug)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub query: String,
}
