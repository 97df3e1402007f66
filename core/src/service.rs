//! Service facade over the reconciliation engine and its stores.
//!
//! `InventoryService` bundles the store trait objects and the clock, the
//! way an aggregate environment bundles its dependencies. Read operations
//! return `Result` and let infrastructure errors propagate; mutating
//! operations catch every error and normalize it into a
//! [`MutationOutcome`] with a message a caller can render directly.
//!
//! # Concurrency
//!
//! Every mutation follows read-check-then-write against stores that offer
//! no transaction spanning all sources. To keep two concurrent mutations on
//! the same event from both passing checks computed before either write, the
//! service serializes mutations per event through an in-process async mutex
//! registry. Reads take no lock and are always recomputed from source;
//! cross-process writers remain unguarded.

use crate::audit::{apply_filter, LogFilter, DEFAULT_LOG_LIMIT};
use crate::blocks::{self, GaBlockRequest, SeatBlockRequest};
use crate::capacity::{self, CapacityAdjustment};
use crate::engine::{self, SummarySources};
use crate::environment::Clock;
use crate::error::InventoryError;
use crate::reserved::{filter_seats, SeatFilter};
use crate::store::{
    BlockStore, EventConfigStore, HoldStore, LayoutStore, LogStore, OrderStore,
};
use crate::types::{
    Block, BlockId, EventId, EventInventorySummary, InventoryKind, InventoryLog, LogId,
    SeatInventory,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Normalized result of a mutating operation.
///
/// Failures carry the concrete violated numbers in `message` (capacity
/// floor, available count, offending seats) so batch callers degrade to a
/// visible message instead of crashing.
#[derive(Clone, Debug)]
pub struct MutationOutcome {
    /// Whether the mutation was applied.
    pub success: bool,
    /// Human-readable description of what happened or why it was rejected.
    pub message: String,
    /// Blocks created or released by this mutation.
    pub block_ids: Vec<BlockId>,
    /// The audit entry written on success.
    pub log_id: Option<LogId>,
}

impl MutationOutcome {
    /// A successful outcome.
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            block_ids: Vec::new(),
            log_id: None,
        }
    }

    /// A failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            block_ids: Vec::new(),
            log_id: None,
        }
    }

    /// Attaches the blocks touched by the mutation.
    #[must_use]
    pub fn with_blocks(mut self, block_ids: Vec<BlockId>) -> Self {
        self.block_ids = block_ids;
        self
    }

    /// Attaches the audit entry id.
    #[must_use]
    pub const fn with_log(mut self, log_id: LogId) -> Self {
        self.log_id = Some(log_id);
        self
    }
}

/// The reconciliation engine's public surface.
pub struct InventoryService {
    pub(crate) config_store: Arc<dyn EventConfigStore>,
    pub(crate) layout_store: Arc<dyn LayoutStore>,
    pub(crate) order_store: Arc<dyn OrderStore>,
    pub(crate) hold_store: Arc<dyn HoldStore>,
    pub(crate) block_store: Arc<dyn BlockStore>,
    pub(crate) log_store: Arc<dyn LogStore>,
    pub(crate) clock: Arc<dyn Clock>,
    /// Per-event mutation locks; see the module docs.
    locks: Mutex<HashMap<EventId, Arc<tokio::sync::Mutex<()>>>>,
}

impl InventoryService {
    /// Creates a service over the given stores and clock.
    #[must_use]
    pub fn new(
        config_store: Arc<dyn EventConfigStore>,
        layout_store: Arc<dyn LayoutStore>,
        order_store: Arc<dyn OrderStore>,
        hold_store: Arc<dyn HoldStore>,
        block_store: Arc<dyn BlockStore>,
        log_store: Arc<dyn LogStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config_store,
            layout_store,
            order_store,
            hold_store,
            block_store,
            log_store,
            clock,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn event_lock(&self, event_id: &EventId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Evict entries no in-flight mutation holds, so the registry does
        // not grow with every event ever mutated.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(event_id.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Computes the reconciled inventory summary for one event.
    ///
    /// Always rebuilt from source data; never cached. For reserved events
    /// the full layout is fetched in addition to the event's own snapshot.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NotFound`] when the event does not exist;
    /// [`InventoryError::Store`] when any source read fails (propagated
    /// unmodified).
    pub async fn get_summary(
        &self,
        event_id: &EventId,
    ) -> Result<EventInventorySummary, InventoryError> {
        let config = self
            .config_store
            .fetch_event(event_id)
            .await?
            .ok_or_else(|| InventoryError::not_found(format!("event {event_id}")))?;

        let layout = if engine::classify(&config) == InventoryKind::Reserved {
            match &config.layout_id {
                Some(layout_id) => self.layout_store.fetch_layout(layout_id).await?,
                None => None,
            }
        } else {
            None
        };

        let orders = self.order_store.orders_for_event(event_id).await?;
        let holds = self.hold_store.holds_for_event(event_id).await?;
        let blocks = self.block_store.active_blocks_for_event(event_id).await?;

        let sources = SummarySources {
            config,
            layout,
            orders,
            holds,
            blocks,
        };
        Ok(engine::build_summary(&sources, self.clock.now()))
    }

    /// Changes one tier's capacity by a signed delta, enforcing the
    /// `sold + blocked` floor on reductions.
    pub async fn adjust_capacity(&self, req: CapacityAdjustment) -> MutationOutcome {
        let lock = self.event_lock(&req.event_id);
        let _guard = lock.lock().await;
        capacity::adjust(self, req).await.unwrap_or_else(Self::rejected)
    }

    /// Withholds a quantity from a GA tier.
    pub async fn block_ga(&self, req: GaBlockRequest) -> MutationOutcome {
        let lock = self.event_lock(&req.event_id);
        let _guard = lock.lock().await;
        blocks::block_ga(self, req).await.unwrap_or_else(Self::rejected)
    }

    /// Releases one GA block. A released block can never be released again.
    pub async fn unblock_ga(
        &self,
        event_id: EventId,
        block_id: BlockId,
        actor: impl Into<String>,
    ) -> MutationOutcome {
        let lock = self.event_lock(&event_id);
        let _guard = lock.lock().await;
        blocks::unblock_ga(self, event_id, block_id, actor.into())
            .await
            .unwrap_or_else(Self::rejected)
    }

    /// Withholds specific seats, all-or-nothing.
    pub async fn block_seats(&self, req: SeatBlockRequest) -> MutationOutcome {
        let lock = self.event_lock(&req.event_id);
        let _guard = lock.lock().await;
        blocks::block_seats(self, req).await.unwrap_or_else(Self::rejected)
    }

    /// Releases seat blocks with partial-success semantics: blocks that are
    /// missing, foreign, GA-typed, or already released are silently skipped;
    /// the call fails only when nothing was releasable.
    pub async fn unblock_seats(
        &self,
        event_id: EventId,
        block_ids: Vec<BlockId>,
        actor: impl Into<String>,
    ) -> MutationOutcome {
        let lock = self.event_lock(&event_id);
        let _guard = lock.lock().await;
        blocks::unblock_seats(self, event_id, block_ids, actor.into())
            .await
            .unwrap_or_else(Self::rejected)
    }

    /// Full block history for an event (active and released), newest-first.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Store`] when the block store read fails.
    pub async fn get_blocks(&self, event_id: &EventId) -> Result<Vec<Block>, InventoryError> {
        Ok(self.block_store.blocks_for_event(event_id).await?)
    }

    /// Most recent audit entries, newest-first, with the secondary filter
    /// applied in memory on top of the fetched window.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Store`] when the log store read fails.
    pub async fn get_logs(
        &self,
        event_id: &EventId,
        filter: &LogFilter,
        limit: Option<usize>,
    ) -> Result<Vec<InventoryLog>, InventoryError> {
        let entries = self
            .log_store
            .recent(event_id, limit.unwrap_or(DEFAULT_LOG_LIMIT))
            .await?;
        Ok(apply_filter(entries, filter))
    }

    /// Seats of a reserved event filtered by status and/or section.
    ///
    /// # Errors
    ///
    /// [`InventoryError::Validation`] when the event is not reserved
    /// seating; otherwise as [`Self::get_summary`].
    pub async fn get_filtered_seats(
        &self,
        event_id: &EventId,
        filter: &SeatFilter,
    ) -> Result<Vec<SeatInventory>, InventoryError> {
        let summary = self.get_summary(event_id).await?;
        let sections = summary.sections().ok_or_else(|| {
            InventoryError::validation(format!(
                "event {event_id} is not a reserved-seating event"
            ))
        })?;
        Ok(filter_seats(sections, filter))
    }

    fn rejected(error: InventoryError) -> MutationOutcome {
        tracing::warn!(error = %error, "inventory mutation rejected");
        MutationOutcome::failed(error.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::types::{EventConfig, Hold, Layout, LayoutId, Order, TierId};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    // The lock registry never touches the stores, so the service can be
    // wired over inert stubs. Using `TestStores` here is impossible: the
    // testing crate is a dev-dependency that itself depends on this crate,
    // so its `InventoryService` comes from a separate compilation whose
    // private items (and types) this unit test cannot reach.
    struct StubStores;

    #[async_trait]
    impl EventConfigStore for StubStores {
        async fn fetch_event(
            &self,
            _event_id: &EventId,
        ) -> Result<Option<EventConfig>, StoreError> {
            Ok(None)
        }

        async fn update_tier_capacity(
            &self,
            _event_id: &EventId,
            _tier_id: &TierId,
            _new_capacity: u32,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[async_trait]
    impl LayoutStore for StubStores {
        async fn fetch_layout(&self, _layout_id: &LayoutId) -> Result<Option<Layout>, StoreError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl OrderStore for StubStores {
        async fn orders_for_event(&self, _event_id: &EventId) -> Result<Vec<Order>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl HoldStore for StubStores {
        async fn holds_for_event(&self, _event_id: &EventId) -> Result<Vec<Hold>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl BlockStore for StubStores {
        async fn fetch(&self, _block_id: &BlockId) -> Result<Option<Block>, StoreError> {
            Ok(None)
        }

        async fn blocks_for_event(&self, _event_id: &EventId) -> Result<Vec<Block>, StoreError> {
            Ok(Vec::new())
        }

        async fn active_blocks_for_event(
            &self,
            _event_id: &EventId,
        ) -> Result<Vec<Block>, StoreError> {
            Ok(Vec::new())
        }

        async fn insert_group(&self, _blocks: &[Block]) -> Result<(), StoreError> {
            Ok(())
        }

        async fn release_group(
            &self,
            _block_ids: &[BlockId],
            _released_by: &str,
            _released_at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[async_trait]
    impl LogStore for StubStores {
        async fn append(&self, _entry: &InventoryLog) -> Result<(), StoreError> {
            Ok(())
        }

        async fn recent(
            &self,
            _event_id: &EventId,
            _limit: usize,
        ) -> Result<Vec<InventoryLog>, StoreError> {
            Ok(Vec::new())
        }
    }

    impl Clock for StubStores {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    fn stub_service() -> InventoryService {
        let stub = Arc::new(StubStores);
        InventoryService::new(
            stub.clone(),
            stub.clone(),
            stub.clone(),
            stub.clone(),
            stub.clone(),
            stub.clone(),
            stub,
        )
    }

    #[test]
    fn lock_registry_evicts_idle_entries() {
        let service = stub_service();

        let held = service.event_lock(&EventId::new("ev-1"));
        let _other = service.event_lock(&EventId::new("ev-2"));

        // A handle is still out for ev-1, so the sweep keeps it.
        {
            let locks = service.locks.lock().unwrap();
            assert!(locks.contains_key(&EventId::new("ev-1")));
        }

        drop(held);
        let _third = service.event_lock(&EventId::new("ev-3"));

        // With the handle gone, the next acquisition sweeps ev-1 out.
        let locks = service.locks.lock().unwrap();
        assert!(!locks.contains_key(&EventId::new("ev-1")));
        assert!(locks.contains_key(&EventId::new("ev-3")));
    }
}
