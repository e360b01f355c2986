//! Services module - HTTP handlers
//!
//! Each sub-module serves the endpoints of one feature.

pub mod group;
pub mod mentorship;
pub mod migration;
pub mod transcript;
pub mod user;

pub use group::{generate_meeting_link, list_my_groups};
pub use mentorship::{list_messages, list_my_mentorships, post_message};
pub use migration::migrate_database;
pub use transcript::{get_most_recent_started_at, list_summaries, list_transcripts};
pub use user::{create_user, get_me, list_users, search_users, update_user};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
