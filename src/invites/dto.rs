use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for invite generation. The caller's identity comes from
/// the session, never the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInviteRequest {
    #[serde(default)]
    pub email: String,
    pub board_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInviteResponse {
    pub message: String,
    pub token: String,
    pub invite_link: String,
    pub qr_code_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RevokeInviteRequest {
    #[serde(default)]
    pub token: String,
}

/// Query parameters carried by the redemption URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionParams {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub email: String,
    pub board_id: Option<Uuid>,
}

/// Request body accompanying the redemption query parameters at signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_uses_camel_case_board_id() {
        let req: GenerateInviteRequest =
            serde_json::from_str(r#"{"email":"x@y.z","boardId":"00000000-0000-0000-0000-000000000000"}"#)
                .expect("deserialize");
        assert_eq!(req.email, "x@y.z");
        assert_eq!(req.board_id, Some(Uuid::nil()));
    }

    #[test]
    fn generate_response_serializes_camel_case() {
        let resp = GenerateInviteResponse {
            message: "Invite token generated successfully".into(),
            token: "tok".into(),
            invite_link: "http://x/signup?token=tok".into(),
            qr_code_url: "https://qr/".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""inviteLink""#));
        assert!(json.contains(r#""qrCodeUrl""#));
    }

    #[test]
    fn redemption_params_tolerate_missing_fields() {
        let params: RedemptionParams = serde_json::from_str("{}").expect("deserialize");
        assert!(params.token.is_empty());
        assert!(params.email.is_empty());
        assert!(params.board_id.is_none());
    }
}
