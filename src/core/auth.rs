use crate::core::{AppError, AppState};
use crate::entities::{Role, User};
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Content of the JWT issued to users
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: Uuid,
    pub client_id: String,
}

#[instrument(skip(secret), fields(id = %id))]
pub fn encode_jwt(
    id: Uuid,
    client_id: String,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(24);
    let claim = Claims {
        iat: now.timestamp() as usize,
        exp: (now + expire).timestamp() as usize,
        id,
        client_id,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .inspect_err(|e| error!("Failed to encode JWT token: {:?}", e))
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(
    jwt_token: &str,
    secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    debug!("Decoding JWT token");
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
}

/// Extracts `<token>` from an `Authorization: Bearer <token>` header
fn bearer_token(req: &Request) -> Result<&str, AppError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            warn!("Missing authorization header");
            AppError::unauthorized("Please add the token to the Authorization header")
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Invalid authorization header")
        })?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => {
            warn!("Authorization header is not a bearer token");
            Err(AppError::unauthorized("Invalid authorization header"))
        }
    }
}

/// Resolves the JWT of the request to a `User` and stores it as an extension
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = bearer_token(&req)?;
    let token_data = decode_jwt(token, &state.jwt_secret).map_err(|e| {
        warn!("Failed to decode JWT token: {}", e);
        AppError::unauthorized("Unable to decode token")
    })?;
    let user_id = token_data.claims.id;

    let current_user = match state.user_cache.get(&user_id) {
        Some(user) => user,
        None => match state.user.read(&user_id).await? {
            Some(user) => {
                state.user_cache.insert(user.clone());
                user
            }
            None => {
                warn!("User not found in database: {}", user_id);
                return Err(AppError::unauthorized("You are not an authorized user"));
            }
        },
    };

    debug!("User authenticated: {}", current_user.id);
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Guards machine-to-machine endpoints with the shared integration token
#[instrument(skip(state, req, next))]
pub async fn integration_auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    let expected = state.integration_auth_token.as_deref().ok_or_else(|| {
        warn!("Integration call rejected: no integration token configured");
        AppError::unauthorized("Integration endpoints are disabled")
    })?;

    let token = bearer_token(&req)?;
    if !tokens_match(token, expected) {
        warn!("Integration call rejected: wrong token");
        return Err(AppError::unauthorized("Invalid integration token"));
    }

    info!("Integration call authenticated");
    Ok(next.run(req).await)
}

/// Constant-time equality; only the length is leaked
fn tokens_match(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Passes when `permitted` is empty or the user holds one of its roles
pub fn require_roles(user: &User, permitted: &[Role]) -> Result<(), AppError> {
    if user.roles.is_permitted(permitted) {
        return Ok(());
    }

    warn!(
        "User {} lacks roles, required one of: {:?}",
        user.id, permitted
    );
    Err(AppError::forbidden("Insufficient role").with_details(format!(
        "This action requires one of the following roles: {:?}",
        permitted
    )))
}
