//! Transcript services - meeting transcripts and their summaries

use crate::core::{AppError, AppState, require_roles};
use crate::dtos::{MostRecentStartedAtDTO, SummaryDTO, TranscriptDTO};
use crate::entities::{Group, Role, User};
use crate::repositories::Read;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Roles that may read the history of any group
pub const GROUP_HISTORY_ROLES: [Role; 3] =
    [Role::GroupManager, Role::SummaryEngineer, Role::MentorCoach];

/// Group members, and holders of [`GROUP_HISTORY_ROLES`], may read a group's history
pub async fn check_permission_for_group_history(
    state: &AppState,
    user: &User,
    group: &Group,
) -> Result<(), AppError> {
    if user.roles.is_permitted(&GROUP_HISTORY_ROLES)
        || state.group.is_member(&group.id, &user.id).await?
    {
        return Ok(());
    }

    warn!("User {} denied access to history of group {}", user.id, group.id);
    Err(AppError::forbidden("No permission to access this group's history"))
}

async fn find_group(state: &AppState, group_id: &Uuid) -> Result<Group, AppError> {
    state.group.read(group_id).await?.ok_or_else(|| {
        AppError::not_found("Group not found").with_details(format!("Group {}", group_id))
    })
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, group_id = %group_id))]
pub async fn list_transcripts(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<Uuid>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<TranscriptDTO>>, AppError> {
    let group = find_group(&state, &group_id).await?;
    check_permission_for_group_history(&state, &current_user, &group).await?;

    let transcripts = state.transcript.find_by_group_id(&group_id).await?;
    debug!("Found {} transcripts", transcripts.len());
    Ok(Json(transcripts.into_iter().map(TranscriptDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, group_id = %group_id))]
pub async fn get_most_recent_started_at(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<Uuid>,
    Extension(current_user): Extension<User>,
) -> Result<Json<MostRecentStartedAtDTO>, AppError> {
    require_roles(&current_user, &[Role::MentorCoach, Role::MenteeManager])?;

    let started_at = state.transcript.max_started_at(&group_id).await?;
    Ok(Json(MostRecentStartedAtDTO { started_at }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, transcript_id = %transcript_id))]
pub async fn list_summaries(
    State(state): State<Arc<AppState>>,
    Path(transcript_id): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<SummaryDTO>>, AppError> {
    let transcript = state
        .transcript
        .read(&transcript_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Transcript not found")
                .with_details(format!("Transcript {}", transcript_id))
        })?;

    let group = find_group(&state, &transcript.group_id).await?;
    check_permission_for_group_history(&state, &current_user, &group).await?;

    let summaries = state.summary.find_by_transcript_id(&transcript_id).await?;
    Ok(Json(summaries.into_iter().map(SummaryDTO::from).collect()))
}
