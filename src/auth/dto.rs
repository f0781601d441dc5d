use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for login. Fields default to empty so the presence check
/// happens in the handler (400) rather than in the extractor (422).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after a successful login. The token travels both here
/// and in the session cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn public_user_serializes_camel_case() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            full_name: "Test User".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains(r#""fullName":"Test User""#));
    }
}
