use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-boundary error taxonomy. Every failure a handler can produce is
/// one of these; internal detail is logged server-side and never reaches
/// the client beyond the fixed messages below.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// Unknown email and wrong password collapse to this one variant so the
    /// response never reveals which check failed.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Missing token, non-valid status, and email/board mismatch all
    /// collapse here.
    #[error("Invalid or expired invitation")]
    InvalidInvite,
    #[error("Authentication required")]
    Unauthorized,
    #[error("Not a member of this board")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("Database error")]
    StorageUnavailable,
    #[error("Server configuration error")]
    ServerMisconfigured,
    #[error("Server error")]
    Internal,
}

impl ApiError {
    /// Record-store failure: full detail to the log, generic message out.
    pub fn storage(e: impl std::fmt::Display) -> Self {
        error!(error = %e, "storage operation failed");
        ApiError::StorageUnavailable
    }

    pub fn internal(e: impl std::fmt::Display) -> Self {
        error!(error = %e, "internal error");
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::NOT_FOUND,
            ApiError::InvalidInvite => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::StorageUnavailable
            | ApiError::ServerMisconfigured
            | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
    }

    #[tokio::test]
    async fn invalid_credentials_maps_to_404_with_fixed_message() {
        let (status, body) = body_of(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Invalid username or password"}"#);
    }

    #[tokio::test]
    async fn invalid_invite_message_is_cause_independent() {
        // The same variant covers not-found, reuse, and mismatch, so the
        // bodies are byte-identical no matter which sub-check failed.
        let (status_a, body_a) = body_of(ApiError::InvalidInvite).await;
        let (status_b, body_b) = body_of(ApiError::InvalidInvite).await;
        assert_eq!(status_a, StatusCode::BAD_REQUEST);
        assert_eq!(status_a, status_b);
        assert_eq!(body_a, body_b);
        assert_eq!(body_a, r#"{"error":"Invalid or expired invitation"}"#);
    }

    #[tokio::test]
    async fn status_mapping() {
        assert_eq!(
            body_of(ApiError::BadRequest("x".into())).await.0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(body_of(ApiError::Unauthorized).await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(body_of(ApiError::Forbidden).await.0, StatusCode::FORBIDDEN);
        assert_eq!(
            body_of(ApiError::Conflict("taken".into())).await.0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            body_of(ApiError::StorageUnavailable).await.0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            body_of(ApiError::ServerMisconfigured).await.0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn storage_errors_do_not_leak_detail() {
        let err = ApiError::storage("connection refused on 10.0.0.3:5432");
        let (_, body) = body_of(err).await;
        assert_eq!(body, r#"{"error":"Database error"}"#);
    }
}
