//! Store traits for the data sources the reconciliation engine merges.
//!
//! # Design
//!
//! Each independently-evolving source sits behind its own minimal trait.
//! Event configuration, layout geometry, orders, and holds are read-only
//! inputs produced by the surrounding CRUD features; blocks and audit logs
//! are owned by this core and get write methods.
//!
//! All traits are object-safe (`async_trait`) so the service can hold them
//! as `Arc<dyn …>` and tests can swap in deterministic in-memory
//! implementations.
//!
//! # Implementations
//!
//! - `PostgresBlockStore` / `PostgresLogStore` (in `ticket-inventory-postgres`):
//!   production implementations of the owned stores.
//! - `InMemory*Store` (in `ticket-inventory-testing`): fast, deterministic
//!   testing implementations of every trait.

use crate::error::StoreError;
use crate::types::{
    Block, BlockId, EventConfig, EventId, Hold, InventoryLog, Layout, LayoutId, Order, TierId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read access to event inventory configuration, plus the single write this
/// core performs against it (tier capacity).
#[async_trait]
pub trait EventConfigStore: Send + Sync {
    /// Fetches the inventory configuration for one event.
    ///
    /// Returns `Ok(None)` when the event does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn fetch_event(&self, event_id: &EventId) -> Result<Option<EventConfig>, StoreError>;

    /// Persists a new capacity for one tier of an event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn update_tier_capacity(
        &self,
        event_id: &EventId,
        tier_id: &TierId,
        new_capacity: u32,
    ) -> Result<(), StoreError>;
}

/// Read access to authoritative seat geometry.
#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Fetches a layout document.
    ///
    /// Returns `Ok(None)` when no layout with this id exists; the reserved
    /// builder then falls back to the event's section snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn fetch_layout(&self, layout_id: &LayoutId) -> Result<Option<Layout>, StoreError>;
}

/// Read access to sold-order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetches every order for an event, regardless of status. The engine
    /// decides which statuses count as sold.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn orders_for_event(&self, event_id: &EventId) -> Result<Vec<Order>, StoreError>;
}

/// Read access to time-limited holds.
#[async_trait]
pub trait HoldStore: Send + Sync {
    /// Fetches every hold for an event, expired or not. Expiry is applied
    /// lazily by the engine against the injected clock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn holds_for_event(&self, event_id: &EventId) -> Result<Vec<Hold>, StoreError>;
}

/// Owned store for inventory blocks.
///
/// Group writes (`insert_group`, `release_group`) must be atomic as a set:
/// either every block in the group is written or none is. The validation
/// read preceding them is *not* part of the same transaction — see the
/// concurrency notes on `InventoryService`.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Fetches one block by id. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn fetch(&self, block_id: &BlockId) -> Result<Option<Block>, StoreError>;

    /// Fetches every block ever created for an event, newest-first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn blocks_for_event(&self, event_id: &EventId) -> Result<Vec<Block>, StoreError>;

    /// Fetches the active blocks for an event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn active_blocks_for_event(&self, event_id: &EventId)
    -> Result<Vec<Block>, StoreError>;

    /// Atomically inserts a group of new blocks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails; on failure no
    /// block from the group may be persisted.
    async fn insert_group(&self, blocks: &[Block]) -> Result<(), StoreError>;

    /// Atomically marks a group of blocks released, stamping releaser and
    /// release time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails; on failure no
    /// block from the group may be released.
    async fn release_group(
        &self,
        block_ids: &[BlockId],
        released_by: &str,
        released_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Owned append-only store for audit log entries.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Appends one entry. Entries are never mutated afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn append(&self, entry: &InventoryLog) -> Result<(), StoreError>;

    /// Fetches the most recent `limit` entries for an event, newest-first.
    ///
    /// Secondary filtering (action, kind, actor, date range) happens in
    /// memory on top of this call; the store only guarantees the
    /// `(event_id, performed_at)` ordering.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store call fails.
    async fn recent(&self, event_id: &EventId, limit: usize)
    -> Result<Vec<InventoryLog>, StoreError>;
}
