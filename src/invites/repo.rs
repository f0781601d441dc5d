use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle state of an invitation token. Transitions only move forward:
/// `valid -> used` on redemption, `valid -> revoked` by a board member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invite_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Valid,
    Used,
    Revoked,
}

/// Invitation token record, keyed by the opaque token string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InviteToken {
    pub token: String,
    pub board_id: Uuid,
    pub inviter_id: Uuid,
    pub email: String, // intended recipient
    pub status: InviteStatus,
    pub created_at: OffsetDateTime,
    pub used_at: Option<OffsetDateTime>,
}

impl InviteToken {
    pub async fn create(
        db: &PgPool,
        token: &str,
        board_id: Uuid,
        inviter_id: Uuid,
        email: &str,
    ) -> anyhow::Result<InviteToken> {
        let invite = sqlx::query_as::<_, InviteToken>(
            r#"
            INSERT INTO invite_tokens (token, board_id, inviter_id, email)
            VALUES ($1, $2, $3, $4)
            RETURNING token, board_id, inviter_id, email, status, created_at, used_at
            "#,
        )
        .bind(token)
        .bind(board_id)
        .bind(inviter_id)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(invite)
    }

    pub async fn find(db: &PgPool, token: &str) -> anyhow::Result<Option<InviteToken>> {
        let invite = sqlx::query_as::<_, InviteToken>(
            r#"
            SELECT token, board_id, inviter_id, email, status, created_at, used_at
            FROM invite_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(invite)
    }

    /// Claims a valid token for `(email, board_id)`, transitioning it to
    /// `used`. The WHERE clause is the compare-and-swap: under concurrent
    /// redemption of one token, exactly one caller gets the row back and
    /// every other caller matches zero rows.
    pub async fn redeem_tx(
        tx: &mut Transaction<'_, Postgres>,
        token: &str,
        email: &str,
        board_id: Uuid,
    ) -> anyhow::Result<Option<InviteToken>> {
        let invite = sqlx::query_as::<_, InviteToken>(
            r#"
            UPDATE invite_tokens
            SET status = 'used', used_at = now()
            WHERE token = $1 AND status = 'valid' AND email = $2 AND board_id = $3
            RETURNING token, board_id, inviter_id, email, status, created_at, used_at
            "#,
        )
        .bind(token)
        .bind(email)
        .bind(board_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(invite)
    }

    /// Conditional `valid -> revoked` transition. Returns `None` when the
    /// token is unknown or no longer valid; the row itself is kept.
    pub async fn revoke(db: &PgPool, token: &str) -> anyhow::Result<Option<InviteToken>> {
        let invite = sqlx::query_as::<_, InviteToken>(
            r#"
            UPDATE invite_tokens
            SET status = 'revoked'
            WHERE token = $1 AND status = 'valid'
            RETURNING token, board_id, inviter_id, email, status, created_at, used_at
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(invite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&InviteStatus::Valid).unwrap(), r#""valid""#);
        assert_eq!(serde_json::to_string(&InviteStatus::Used).unwrap(), r#""used""#);
        assert_eq!(
            serde_json::to_string(&InviteStatus::Revoked).unwrap(),
            r#""revoked""#
        );
    }
}
