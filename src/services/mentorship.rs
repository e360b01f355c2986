//! Mentorship services - pairings and their chat rooms

use crate::core::{AppError, AppState};
use crate::dtos::{ChatMessageDTO, CreateChatMessageDTO, MentorshipDTO};
use crate::entities::{Mentorship, Role, User};
use crate::repositories::chat::NewChatMessage;
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Roles that may read and write any mentorship's chat
pub const MENTORSHIP_SUPERVISOR_ROLES: [Role; 2] = [Role::MentorCoach, Role::MenteeManager];

pub fn can_access_mentorship(user: &User, mentorship: &Mentorship) -> bool {
    mentorship.is_participant(&user.id) || user.roles.is_permitted(&MENTORSHIP_SUPERVISOR_ROLES)
}

async fn find_accessible_mentorship(
    state: &AppState,
    user: &User,
    mentorship_id: &Uuid,
) -> Result<Mentorship, AppError> {
    let mentorship = state.mentorship.read(mentorship_id).await?.ok_or_else(|| {
        AppError::not_found("Mentorship not found")
            .with_details(format!("Mentorship {}", mentorship_id))
    })?;

    if !can_access_mentorship(user, &mentorship) {
        warn!("User {} denied access to mentorship {}", user.id, mentorship_id);
        return Err(AppError::forbidden("You are not part of this mentorship"));
    }
    Ok(mentorship)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_my_mentorships(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<MentorshipDTO>>, AppError> {
    let mentorships = state.mentorship.find_by_participant(&current_user.id).await?;
    Ok(Json(mentorships.into_iter().map(MentorshipDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, mentorship_id = %mentorship_id))]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(mentorship_id): Path<Uuid>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<ChatMessageDTO>>, AppError> {
    find_accessible_mentorship(&state, &current_user, &mentorship_id).await?;

    // no room yet means no messages yet
    let messages = match state.chat.find_room_by_mentorship(&mentorship_id).await? {
        Some(room) => state.chat.list_messages(&room.id).await?,
        None => Vec::new(),
    };
    Ok(Json(messages.into_iter().map(ChatMessageDTO::from).collect()))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, mentorship_id = %mentorship_id))]
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(mentorship_id): Path<Uuid>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateChatMessageDTO>,
) -> Result<Json<ChatMessageDTO>, AppError> {
    body.validate()?;
    find_accessible_mentorship(&state, &current_user, &mentorship_id).await?;

    let room = state.chat.get_or_create_room(&mentorship_id).await?;
    let message = state
        .chat
        .create(&NewChatMessage {
            room_id: room.id,
            user_id: current_user.id,
            markdown: body.markdown,
        })
        .await?;

    info!("Message {} posted", message.id);
    Ok(Json(ChatMessageDTO::from(message)))
}
