//! Board membership contracts. Board and task CRUD live elsewhere; the
//! auth core only needs to ask "is this caller on the board" and to attach
//! a newly signed-up user to the invited board.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// True when the user owns the board or holds a membership row.
pub async fn is_member(db: &PgPool, board_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
    let member = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM boards WHERE id = $1 AND owner_id = $2
            UNION ALL
            SELECT 1 FROM board_members WHERE board_id = $1 AND user_id = $2
        )
        "#,
    )
    .bind(board_id)
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(member)
}

/// Attach a user to a board inside the redemption transaction. Re-adding
/// an existing member is a no-op.
pub async fn add_member_tx(
    tx: &mut Transaction<'_, Postgres>,
    board_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO board_members (board_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (board_id, user_id) DO NOTHING
        "#,
    )
    .bind(board_id)
    .bind(user_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
