//! User services - profile management and user administration

use crate::core::{AppError, AppState, require_roles};
use crate::dtos::{
    CreateUserDTO, PublicUserDTO, SearchUsersResponseDTO, UpdateUserDTO, UserChangesDTO,
    UserProfileDTO, UserSearchQuery,
};
use crate::entities::{Role, User};
use crate::repositories::{Create, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
};
use axum_macros::debug_handler;
use lazy_static::lazy_static;
use pinyin::ToPinyin;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    // Han characters, optionally split by a middle dot (transliterated names)
    static ref CHINESE_NAME: Regex = Regex::new(
        r"^[\x{3400}-\x{4DBF}\x{4E00}-\x{9FFF}]+(\x{00B7}[\x{3400}-\x{4DBF}\x{4E00}-\x{9FFF}]+)*$"
    )
    .expect("valid chinese name regex");
}

pub fn is_valid_chinese_name(name: &str) -> bool {
    let len = name.chars().count();
    (2..=32).contains(&len) && CHINESE_NAME.is_match(name)
}

/// Lowercase toneless pinyin, characters without a reading are kept as-is
pub fn to_pinyin(name: &str) -> String {
    name.chars()
        .zip(name.to_pinyin())
        .map(|(c, p)| match p {
            Some(p) => p.plain().to_string(),
            None => c.to_string(),
        })
        .collect()
}

/// Columns written for a profile update; only user managers change roles and email
pub fn profile_changes(is_user_manager: bool, name: &str, body: &UpdateUserDTO) -> UserChangesDTO {
    UserChangesDTO {
        name: name.to_string(),
        pinyin: to_pinyin(name),
        consent_form_accepted_at: body.consent_form_accepted_at,
        email: body.email.clone().filter(|_| is_user_manager),
        roles: body.roles.clone().filter(|_| is_user_manager),
    }
}

#[instrument(skip(state, current_user, body), fields(caller = %current_user.id))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateUserDTO>,
) -> Result<Json<&'static str>, AppError> {
    require_roles(&current_user, &[Role::UserManager])?;
    body.validate()?;

    if state.user.find_by_client_id(&body.client_id).await?.is_some() {
        warn!("User with client id {} already exists", body.client_id);
        return Err(AppError::bad_request("User already exists")
            .with_details("this user is already created in our db"));
    }

    let user = state.user.create(&body).await?;
    info!("User {} created", user.id);
    Ok(Json("ok"))
}

#[instrument(skip(state, current_user), fields(caller = %current_user.id, query = %params.query))]
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<UserSearchQuery>,
) -> Result<Json<SearchUsersResponseDTO>, AppError> {
    require_roles(&current_user, &[Role::UserManager])?;

    let users = state.user.search(&params.query).await?;
    info!("Found {} users matching search criteria", users.len());
    Ok(Json(SearchUsersResponseDTO {
        users: users.into_iter().map(PublicUserDTO::from).collect(),
    }))
}

#[instrument(skip(state, current_user), fields(caller = %current_user.id))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<UserProfileDTO>>, AppError> {
    require_roles(&current_user, &[Role::UserManager])?;

    let users = state.user.list_ordered_by_pinyin().await?;
    debug!("Listing {} users", users.len());
    Ok(Json(users.into_iter().map(UserProfileDTO::from).collect()))
}

pub async fn get_me(Extension(current_user): Extension<User>) -> Json<UserProfileDTO> {
    Json(UserProfileDTO::from(current_user))
}

/// Anyone can update a profile, but only user managers can update others'.
/// Name changes may take up to the user cache TTL to reach other nodes.
#[debug_handler]
#[instrument(skip(state, current_user, body), fields(caller = %current_user.id, target = %user_id))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateUserDTO>,
) -> Result<Json<UserProfileDTO>, AppError> {
    let is_user_manager = current_user.roles.contains(Role::UserManager);
    let is_self = current_user.id == user_id;
    if !is_user_manager && !is_self {
        warn!("Profile update of another user rejected");
        return Err(AppError::forbidden("You can only update your own profile"));
    }

    let name = body
        .name
        .as_deref()
        .filter(|name| is_valid_chinese_name(name))
        .ok_or_else(|| AppError::bad_request("Invalid user name"))?;
    body.validate()?;

    if state.user.read(&user_id).await?.is_none() {
        return Err(AppError::not_found("User not found")
            .with_details(format!("User {} not found.", user_id)));
    }

    let changes = profile_changes(is_user_manager, name, &body);
    let updated = state.user.update(&user_id, &changes).await?;
    state.user_cache.invalidate_all();

    info!("Profile updated");
    Ok(Json(UserProfileDTO::from(updated)))
}
