use axum::{
    extract::{Query, State},
    Json,
};
use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::MessageResponse, extractors::AuthUser, handlers::is_valid_email,
        password::hash_password, repo::User,
    },
    boards,
    error::ApiError,
    invites::{
        dto::{
            GenerateInviteRequest, GenerateInviteResponse, RedemptionParams,
            RevokeInviteRequest, SignupRequest, SignupResponse,
        },
        link,
        repo::InviteToken,
    },
    state::AppState,
};

/// Opaque token string. Unguessable within the registry's cardinality;
/// redemption additionally requires the matching email and board.
fn mint_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

#[instrument(skip(state, payload))]
pub async fn generate_invite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GenerateInviteRequest>,
) -> Result<Json<GenerateInviteResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    let board_id = payload
        .board_id
        .ok_or_else(|| ApiError::BadRequest("Missing required fields".into()))?;
    if email.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid invite email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    // Only board members may mint invitations for it
    let member = boards::repo::is_member(&state.db, board_id, user_id)
        .await
        .map_err(ApiError::storage)?;
    if !member {
        warn!(user_id = %user_id, %board_id, "invite attempt by non-member");
        return Err(ApiError::Forbidden);
    }

    let token = mint_token();
    let invite = InviteToken::create(&state.db, &token, board_id, user_id, &email)
        .await
        .map_err(ApiError::storage)?;

    let invite_link = link::invite_link(
        &state.config.public_origin,
        &invite.token,
        &invite.email,
        invite.board_id,
    );
    let qr_code_url = link::qr_code_url(&invite_link);

    info!(inviter_id = %user_id, %board_id, email = %invite.email, "invite token generated");
    Ok(Json(GenerateInviteResponse {
        message: "Invite token generated successfully".into(),
        token: invite.token,
        invite_link,
        qr_code_url,
    }))
}

/// Signup with invite redemption. The conditional status transition, user
/// creation, and membership write commit or roll back together.
#[instrument(skip(state, params, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Query(params): Query<RedemptionParams>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let email = params.email.trim().to_lowercase();
    let board_id = params
        .board_id
        .ok_or_else(|| ApiError::BadRequest("Missing required fields".into()))?;
    if params.token.is_empty() || email.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    // Fail duplicate signups before consuming the token
    if User::find_by_email(&state.db, &email)
        .await
        .map_err(ApiError::storage)?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password).map_err(ApiError::internal)?;

    let mut tx = state.db.begin().await.map_err(ApiError::storage)?;

    let invite = InviteToken::redeem_tx(&mut tx, &params.token, &email, board_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or_else(|| {
            // Unknown token, reuse, and email/board mismatch are
            // indistinguishable to the caller
            warn!(%board_id, "invite redemption rejected");
            ApiError::InvalidInvite
        })?;

    let user = User::create_tx(&mut tx, &email, &hash, payload.full_name.trim())
        .await
        .map_err(ApiError::storage)?;
    boards::repo::add_member_tx(&mut tx, invite.board_id, user.id)
        .await
        .map_err(ApiError::storage)?;

    tx.commit().await.map_err(ApiError::storage)?;

    info!(user_id = %user.id, board_id = %invite.board_id, "invite redeemed, user joined board");
    Ok(Json(SignupResponse {
        message: "success".into(),
        id: user.id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn revoke_invite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RevokeInviteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.token.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }

    let invite = InviteToken::find(&state.db, &payload.token)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::InvalidInvite)?;

    let member = boards::repo::is_member(&state.db, invite.board_id, user_id)
        .await
        .map_err(ApiError::storage)?;
    if !member {
        warn!(user_id = %user_id, board_id = %invite.board_id, "revoke attempt by non-member");
        return Err(ApiError::Forbidden);
    }

    // Conditional transition; an already used or revoked token reports the
    // same error as an unknown one
    InviteToken::revoke(&state.db, &payload.token)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::InvalidInvite)?;

    info!(user_id = %user_id, board_id = %invite.board_id, "invite revoked");
    Ok(Json(MessageResponse {
        message: "success".into(),
    }))
}
