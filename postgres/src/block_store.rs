//! `PostgreSQL` implementation of the block store.

use crate::codec::{parse_quantity, parse_status, status_as_str};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use ticket_inventory_core::{
    Block, BlockId, BlockStore, BlockTarget, EventId, SeatKey, StoreError, TierId,
};

const SELECT_COLUMNS: &str = r"
    id, event_id, target_kind, tier_id, quantity,
    seat_section, seat_row, seat_number,
    reason, notes, blocked_by, blocked_at,
    status, released_by, released_at
";

/// Block store backed by the `inventory_blocks` table.
///
/// Group writes run in a single transaction, which gives [`BlockStore`]'s
/// all-or-nothing contract for `insert_group` and `release_group`.
pub struct PostgresBlockStore {
    pool: PgPool,
}

impl PostgresBlockStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_block(row: &sqlx::postgres::PgRow) -> Result<Block, StoreError> {
        let target_kind: String = row.get("target_kind");
        let target = match target_kind.as_str() {
            "ga" => {
                let tier_id: Option<String> = row.get("tier_id");
                let quantity: Option<i64> = row.get("quantity");
                let (Some(tier_id), Some(quantity)) = (tier_id, quantity) else {
                    return Err(StoreError::Serialization(
                        "ga block row missing tier or quantity".to_string(),
                    ));
                };
                BlockTarget::Ga {
                    tier_id: TierId::new(tier_id),
                    quantity: parse_quantity(quantity)?,
                }
            }
            "seat" => {
                let section: Option<String> = row.get("seat_section");
                let seat_row: Option<String> = row.get("seat_row");
                let number: Option<String> = row.get("seat_number");
                let (Some(section), Some(seat_row), Some(number)) = (section, seat_row, number)
                else {
                    return Err(StoreError::Serialization(
                        "seat block row missing coordinate".to_string(),
                    ));
                };
                BlockTarget::Seat(SeatKey::new(section, seat_row, number))
            }
            other => {
                return Err(StoreError::Serialization(format!(
                    "invalid block target kind: {other}"
                )));
            }
        };

        let status_str: String = row.get("status");
        let event_id: String = row.get("event_id");

        Ok(Block {
            id: BlockId::from_uuid(row.get("id")),
            event_id: EventId::new(event_id),
            target,
            reason: row.get("reason"),
            notes: row.get("notes"),
            blocked_by: row.get("blocked_by"),
            blocked_at: row.get("blocked_at"),
            status: parse_status(&status_str)?,
            released_by: row.get("released_by"),
            released_at: row.get("released_at"),
        })
    }
}

#[async_trait]
impl BlockStore for PostgresBlockStore {
    async fn fetch(&self, block_id: &BlockId) -> Result<Option<Block>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM inventory_blocks WHERE id = $1"
        ))
        .bind(block_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row.as_ref().map(Self::row_to_block).transpose()
    }

    async fn blocks_for_event(&self, event_id: &EventId) -> Result<Vec<Block>, StoreError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM inventory_blocks
            WHERE event_id = $1
            ORDER BY blocked_at DESC
            "
        ))
        .bind(event_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter().map(Self::row_to_block).collect()
    }

    async fn active_blocks_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Block>, StoreError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM inventory_blocks
            WHERE event_id = $1 AND status = 'active'
            ORDER BY blocked_at DESC
            "
        ))
        .bind(event_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter().map(Self::row_to_block).collect()
    }

    async fn insert_group(&self, blocks: &[Block]) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        for block in blocks {
            let (target_kind, tier_id, quantity, seat) = match &block.target {
                BlockTarget::Ga { tier_id, quantity } => {
                    ("ga", Some(tier_id.as_str()), Some(i64::from(*quantity)), None)
                }
                BlockTarget::Seat(seat) => ("seat", None, None, Some(seat)),
            };

            sqlx::query(
                r"
                INSERT INTO inventory_blocks (
                    id, event_id, target_kind, tier_id, quantity,
                    seat_section, seat_row, seat_number,
                    reason, notes, blocked_by, blocked_at,
                    status, released_by, released_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                ",
            )
            .bind(block.id.as_uuid())
            .bind(block.event_id.as_str())
            .bind(target_kind)
            .bind(tier_id)
            .bind(quantity)
            .bind(seat.map(|s| s.section.as_str()))
            .bind(seat.map(|s| s.row.as_str()))
            .bind(seat.map(|s| s.seat.as_str()))
            .bind(&block.reason)
            .bind(&block.notes)
            .bind(&block.blocked_by)
            .bind(block.blocked_at)
            .bind(status_as_str(block.status))
            .bind(&block.released_by)
            .bind(block.released_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(count = blocks.len(), "inventory blocks created");
        metrics::counter!("inventory.blocks.created").increment(blocks.len() as u64);

        Ok(())
    }

    async fn release_group(
        &self,
        block_ids: &[BlockId],
        released_by: &str,
        released_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        for block_id in block_ids {
            sqlx::query(
                r"
                UPDATE inventory_blocks
                SET status = 'released', released_by = $1, released_at = $2
                WHERE id = $3 AND status = 'active'
                ",
            )
            .bind(released_by)
            .bind(released_at)
            .bind(block_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(
            count = block_ids.len(),
            released_by = released_by,
            "inventory blocks released"
        );
        metrics::counter!("inventory.blocks.released").increment(block_ids.len() as u64);

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ticket_inventory_core::BlockStatus;

    // Live-database behavior is covered by the deployment's own checks; these
    // tests pin the column mapping that is pure Rust.

    #[test]
    fn status_column_matches_lifecycle() {
        assert_eq!(status_as_str(BlockStatus::Active), "active");
        assert_eq!(status_as_str(BlockStatus::Released), "released");
    }
}
