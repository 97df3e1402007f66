//! `PostgreSQL` implementation of the audit log store.

use crate::codec::{parse_action, parse_kind};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use ticket_inventory_core::{EventId, InventoryLog, LogId, LogStore, StoreError};

/// Append-only log store backed by the `inventory_logs` table.
pub struct PostgresLogStore {
    pool: PgPool,
}

impl PostgresLogStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &sqlx::postgres::PgRow) -> Result<InventoryLog, StoreError> {
        let action: String = row.get("action");
        let kind: String = row.get("kind");
        let event_id: String = row.get("event_id");

        Ok(InventoryLog {
            id: LogId::from_uuid(row.get("id")),
            event_id: EventId::new(event_id),
            action: parse_action(&action)?,
            kind: parse_kind(&kind)?,
            quantity_change: row.get("quantity_change"),
            previous_value: row.get("previous_value"),
            new_value: row.get("new_value"),
            reason: row.get("reason"),
            performed_by: row.get("performed_by"),
            performed_at: row.get("performed_at"),
        })
    }
}

#[async_trait]
impl LogStore for PostgresLogStore {
    async fn append(&self, entry: &InventoryLog) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO inventory_logs (
                id, event_id, action, kind, quantity_change,
                previous_value, new_value, reason, performed_by, performed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(entry.id.as_uuid())
        .bind(entry.event_id.as_str())
        .bind(entry.action.as_str())
        .bind(entry.kind.as_str())
        .bind(entry.quantity_change)
        .bind(entry.previous_value)
        .bind(entry.new_value)
        .bind(&entry.reason)
        .bind(&entry.performed_by)
        .bind(entry.performed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(
            log_id = %entry.id,
            event_id = %entry.event_id,
            action = entry.action.as_str(),
            "audit entry appended"
        );
        metrics::counter!("inventory.logs.appended", "action" => entry.action.as_str())
            .increment(1);

        Ok(())
    }

    async fn recent(
        &self,
        event_id: &EventId,
        limit: usize,
    ) -> Result<Vec<InventoryLog>, StoreError> {
        #[allow(clippy::cast_possible_wrap)] // window sizes are small
        let rows = sqlx::query(
            r"
            SELECT
                id, event_id, action, kind, quantity_change,
                previous_value, new_value, reason, performed_by, performed_at
            FROM inventory_logs
            WHERE event_id = $1
            ORDER BY performed_at DESC
            LIMIT $2
            ",
        )
        .bind(event_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter().map(Self::row_to_entry).collect()
    }
}
