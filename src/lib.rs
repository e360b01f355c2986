//! Mentorship server library - exposes the main modules for the binary and tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod meeting;
pub mod migration;
pub mod repositories;
pub mod services;

// Re-exports of the main types
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/users", configure_user_routes(state.clone()))
        .nest("/groups", configure_group_routes(state.clone()))
        .nest("/transcripts", configure_transcript_routes(state.clone()))
        .nest("/mentorships", configure_mentorship_routes(state.clone()))
        .nest("/migration", configure_migration_routes(state.clone()))
        .with_state(state)
}

/// User management and profile routes
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_users))
        .route("/me", get(get_me))
        .route("/{user_id}", put(update_user))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Group routes: own groups, meeting links, group transcripts
fn configure_group_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/mine", get(list_my_groups))
        .route("/{group_id}/meeting_link", post(generate_meeting_link))
        .route("/{group_id}/transcripts", get(list_transcripts))
        .route(
            "/{group_id}/transcripts/latest",
            get(get_most_recent_started_at),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_transcript_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/{transcript_id}/summaries", get(list_summaries))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_mentorship_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/mine", get(list_my_mentorships))
        .route(
            "/{mentorship_id}/messages",
            get(list_messages).post(post_message),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Machine-to-machine routes, guarded by the integration token
fn configure_migration_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::integration_auth_middleware;
    use services::*;

    Router::new()
        .route("/migrate_database", post(migrate_database))
        .layer(middleware::from_fn_with_state(
            state,
            integration_auth_middleware,
        ))
}
