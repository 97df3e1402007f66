//! In-memory store implementations for fast, deterministic tests.
//!
//! Every store supports one-shot failure injection via `fail_next_call`,
//! which makes the following call return `StoreError::Unavailable` — used
//! to test the infrastructure-error paths without a real backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use ticket_inventory_core::{
    Block, BlockId, BlockStatus, BlockStore, EventConfig, EventConfigStore, EventId, Hold,
    HoldStore, InventoryLog, Layout, LayoutId, LayoutStore, LogStore, Order, OrderStore,
    StoreError, TierId,
};
use ticket_inventory_core::tiers::SYNTHESIZED_TIER_ID;

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

macro_rules! fail_point {
    ($self:ident) => {
        if $self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
    };
}

/// In-memory event configuration store.
#[derive(Default)]
pub struct InMemoryEventConfigStore {
    events: Mutex<HashMap<EventId, EventConfig>>,
    fail_next: AtomicBool,
}

impl InMemoryEventConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an event configuration.
    pub fn insert(&self, config: EventConfig) {
        relock(&self.events).insert(config.id.clone(), config);
    }

    /// Makes the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventConfigStore for InMemoryEventConfigStore {
    async fn fetch_event(&self, event_id: &EventId) -> Result<Option<EventConfig>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.events).get(event_id).cloned())
    }

    async fn update_tier_capacity(
        &self,
        event_id: &EventId,
        tier_id: &TierId,
        new_capacity: u32,
    ) -> Result<(), StoreError> {
        fail_point!(self);
        let mut events = relock(&self.events);
        let Some(config) = events.get_mut(event_id) else {
            return Err(StoreError::Unavailable(format!(
                "event {event_id} vanished during capacity update"
            )));
        };
        if let Some(tt) = config.ticket_types.iter_mut().find(|t| t.id == *tier_id) {
            tt.capacity = new_capacity;
        } else if let Some(pt) = config.pricing_tiers.iter_mut().find(|t| t.id == *tier_id) {
            pt.capacity = new_capacity;
        } else if tier_id.as_str() == SYNTHESIZED_TIER_ID {
            // The synthesized tier is backed by the event's flat capacity.
            config.total_capacity = new_capacity;
        }
        Ok(())
    }
}

/// In-memory layout store.
#[derive(Default)]
pub struct InMemoryLayoutStore {
    layouts: Mutex<HashMap<LayoutId, Layout>>,
    fail_next: AtomicBool,
}

impl InMemoryLayoutStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a layout document.
    pub fn insert(&self, layout: Layout) {
        relock(&self.layouts).insert(layout.id.clone(), layout);
    }

    /// Makes the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LayoutStore for InMemoryLayoutStore {
    async fn fetch_layout(&self, layout_id: &LayoutId) -> Result<Option<Layout>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.layouts).get(layout_id).cloned())
    }
}

/// In-memory order store.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<Vec<Order>>,
    fail_next: AtomicBool,
}

impl InMemoryOrderStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an order.
    pub fn insert(&self, order: Order) {
        relock(&self.orders).push(order);
    }

    /// Makes the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn orders_for_event(&self, event_id: &EventId) -> Result<Vec<Order>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.orders)
            .iter()
            .filter(|o| o.event_id == *event_id)
            .cloned()
            .collect())
    }
}

/// In-memory hold store.
#[derive(Default)]
pub struct InMemoryHoldStore {
    holds: Mutex<Vec<Hold>>,
    fail_next: AtomicBool,
}

impl InMemoryHoldStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hold.
    pub fn insert(&self, hold: Hold) {
        relock(&self.holds).push(hold);
    }

    /// Makes the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HoldStore for InMemoryHoldStore {
    async fn holds_for_event(&self, event_id: &EventId) -> Result<Vec<Hold>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.holds)
            .iter()
            .filter(|h| h.event_id == *event_id)
            .cloned()
            .collect())
    }
}

/// In-memory block store. Group writes are trivially atomic under the lock.
#[derive(Default)]
pub struct InMemoryBlockStore {
    blocks: Mutex<Vec<Block>>,
    fail_next: AtomicBool,
}

impl InMemoryBlockStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks ever created, regardless of status.
    #[must_use]
    pub fn len(&self) -> usize {
        relock(&self.blocks).len()
    }

    /// Whether no block was ever created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlockStore for InMemoryBlockStore {
    async fn fetch(&self, block_id: &BlockId) -> Result<Option<Block>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.blocks)
            .iter()
            .find(|b| b.id == *block_id)
            .cloned())
    }

    async fn blocks_for_event(&self, event_id: &EventId) -> Result<Vec<Block>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.blocks)
            .iter()
            .rev()
            .filter(|b| b.event_id == *event_id)
            .cloned()
            .collect())
    }

    async fn active_blocks_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Block>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.blocks)
            .iter()
            .filter(|b| b.event_id == *event_id && b.status == BlockStatus::Active)
            .cloned()
            .collect())
    }

    async fn insert_group(&self, blocks: &[Block]) -> Result<(), StoreError> {
        fail_point!(self);
        relock(&self.blocks).extend_from_slice(blocks);
        Ok(())
    }

    async fn release_group(
        &self,
        block_ids: &[BlockId],
        released_by: &str,
        released_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        fail_point!(self);
        let mut blocks = relock(&self.blocks);
        for block in blocks.iter_mut() {
            if block_ids.contains(&block.id) && block.status == BlockStatus::Active {
                block.status = BlockStatus::Released;
                block.released_by = Some(released_by.to_string());
                block.released_at = Some(released_at);
            }
        }
        Ok(())
    }
}

/// In-memory append-only log store.
#[derive(Default)]
pub struct InMemoryLogStore {
    entries: Mutex<Vec<InventoryLog>>,
    fail_next: AtomicBool,
}

impl InMemoryLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries ever appended.
    #[must_use]
    pub fn len(&self) -> usize {
        relock(&self.entries).len()
    }

    /// Whether no entry was ever appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn append(&self, entry: &InventoryLog) -> Result<(), StoreError> {
        fail_point!(self);
        relock(&self.entries).push(entry.clone());
        Ok(())
    }

    async fn recent(
        &self,
        event_id: &EventId,
        limit: usize,
    ) -> Result<Vec<InventoryLog>, StoreError> {
        fail_point!(self);
        Ok(relock(&self.entries)
            .iter()
            .rev()
            .filter(|e| e.event_id == *event_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
