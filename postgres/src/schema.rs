//! Schema bootstrap for the tables this crate owns.

use sqlx::PgPool;
use ticket_inventory_core::StoreError;

/// Creates the block and audit-log tables plus their per-event indexes if
/// they do not exist yet.
///
/// Idempotent; safe to call on every startup.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] if any DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS inventory_blocks (
            id UUID PRIMARY KEY,
            event_id TEXT NOT NULL,
            target_kind TEXT NOT NULL,
            tier_id TEXT,
            quantity BIGINT,
            seat_section TEXT,
            seat_row TEXT,
            seat_number TEXT,
            reason TEXT NOT NULL,
            notes TEXT,
            blocked_by TEXT NOT NULL,
            blocked_at TIMESTAMPTZ NOT NULL,
            status TEXT NOT NULL,
            released_by TEXT,
            released_at TIMESTAMPTZ
        )
        ",
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    sqlx::query(
        r"
        CREATE INDEX IF NOT EXISTS idx_inventory_blocks_event
        ON inventory_blocks (event_id, blocked_at DESC)
        ",
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS inventory_logs (
            id UUID PRIMARY KEY,
            event_id TEXT NOT NULL,
            action TEXT NOT NULL,
            kind TEXT NOT NULL,
            quantity_change BIGINT NOT NULL,
            previous_value BIGINT,
            new_value BIGINT,
            reason TEXT NOT NULL,
            performed_by TEXT NOT NULL,
            performed_at TIMESTAMPTZ NOT NULL
        )
        ",
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    sqlx::query(
        r"
        CREATE INDEX IF NOT EXISTS idx_inventory_logs_event
        ON inventory_logs (event_id, performed_at DESC)
        ",
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    tracing::info!("inventory schema ensured");

    Ok(())
}
