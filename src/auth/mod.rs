use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod claims;
pub mod cookie;
pub(crate) mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::me))
}
