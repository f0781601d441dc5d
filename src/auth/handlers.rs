use axum::{
    extract::{FromRef, State},
    http::{header, HeaderMap},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        cookie,
        dto::{LoginRequest, LoginResponse, MessageResponse, PublicUser},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::verify_password,
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

/// Syntactic sanity check only, not RFC-compliant validation.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Presence check before any store access or hashing
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("email or password is missing".into()));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::storage)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::internal)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email).map_err(ApiError::internal)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookie::session_cookie(&token, keys.ttl, state.config.cookie_secure)
            .parse()
            .map_err(ApiError::internal)?,
    );

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        headers,
        Json(LoginResponse {
            message: "success".into(),
            token,
            id: user.id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> (HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    if let Ok(value) = cookie::clear_session_cookie(state.config.cookie_secure).parse() {
        headers.insert(header::SET_COOKIE, value);
    }
    (
        headers,
        Json(MessageResponse {
            message: "success".into(),
        }),
    )
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    }))
}
