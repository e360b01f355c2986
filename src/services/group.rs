//! Group services - the caller's groups and their meeting links

use crate::core::{AppError, AppState};
use crate::dtos::{GroupDTO, MeetingLinkDTO, PublicUserDTO, TranscriptDTO};
use crate::entities::{Group, Role, User};
use crate::repositories::{Read, ReadMany};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use axum_macros::debug_handler;
use chrono::{DateTime, Duration, Utc};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Links are valid for 31 days after the meeting start; renew after 30
pub const MEETING_LINK_VALIDITY_DAYS: i64 = 30;

/// Meeting duration requested from the provider
pub const MEETING_DURATION_SECS: i64 = 3600;

pub fn meeting_link_is_expired(link_created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > link_created_at + Duration::days(MEETING_LINK_VALIDITY_DAYS)
}

/// The stored link, if there is one and it is still valid
pub fn reusable_meeting_link(group: &Group, now: DateTime<Utc>) -> Option<&str> {
    group
        .meeting_link
        .as_deref()
        .filter(|link| !link.is_empty() && !meeting_link_is_expired(group.updated_at, now))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_my_groups(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<GroupDTO>>, AppError> {
    let groups = state.group.find_by_user_id(&current_user.id).await?;
    debug!("User is member of {} groups", groups.len());

    let result = try_join_all(groups.into_iter().map(|group| {
        let state = state.clone();
        async move {
            let (memberships, transcripts) = futures::try_join!(
                state.group.find_memberships(&group.id),
                state.transcript.find_by_group_id(&group.id),
            )?;
            let user_ids: Vec<Uuid> = memberships.iter().map(|m| m.user_id).collect();
            let users = state.user.read_many(&user_ids).await?;
            Ok::<_, sqlx::Error>(GroupDTO::from_parts(
                group,
                users.into_iter().map(PublicUserDTO::from).collect(),
                transcripts.into_iter().map(TranscriptDTO::from).collect(),
            ))
        }
    }))
    .await?;

    info!("Successfully retrieved {} groups", result.len());
    Ok(Json(result))
}

#[debug_handler]
#[instrument(skip(state, current_user), fields(user_id = %current_user.id, group_id = %group_id))]
pub async fn generate_meeting_link(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<Uuid>,
    Extension(current_user): Extension<User>,
) -> Result<Json<MeetingLinkDTO>, AppError> {
    let group = state
        .group
        .read(&group_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Group not found").with_details(format!("Group {}", group_id))
        })?;

    if !current_user.roles.contains(Role::GroupManager)
        && !state.group.is_member(&group_id, &current_user.id).await?
    {
        warn!("Meeting link requested by a non-member");
        return Err(AppError::forbidden("You are not a member of this group"));
    }

    let now = Utc::now();
    if let Some(link) = reusable_meeting_link(&group, now) {
        debug!("Reusing existing meeting link");
        return Ok(Json(MeetingLinkDTO {
            meeting_link: link.to_string(),
        }));
    }

    let start = now.timestamp();
    let meeting_link = state
        .meeting
        .create_meeting(&group.id.to_string(), start, start + MEETING_DURATION_SECS)
        .await?
        .single_join_url()?;

    state.group.update_meeting_link(&group.id, &meeting_link).await?;

    info!("New meeting link generated");
    Ok(Json(MeetingLinkDTO { meeting_link }))
}
