use crate::state::AppState;
use axum::{routing::post, Router};

pub(crate) mod dto;
pub mod handlers;
pub mod link;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-invite", post(handlers::generate_invite))
        .route("/revoke-invite", post(handlers::revoke_invite))
        .route("/signup", post(handlers::signup))
}
