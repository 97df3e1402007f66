//! Pre-wired bundle of in-memory stores and a fixed clock.

use crate::mocks::{test_clock, FixedClock};
use crate::stores::{
    InMemoryBlockStore, InMemoryEventConfigStore, InMemoryHoldStore, InMemoryLayoutStore,
    InMemoryLogStore, InMemoryOrderStore,
};
use std::sync::Arc;
use ticket_inventory_core::InventoryService;

/// Bundle of shared in-memory stores plus a deterministic clock.
///
/// Keep a handle on the bundle after calling [`TestStores::service`] so the
/// test can seed data and inspect writes through the same store instances
/// the service sees.
pub struct TestStores {
    /// Event configuration store.
    pub configs: Arc<InMemoryEventConfigStore>,
    /// Layout store.
    pub layouts: Arc<InMemoryLayoutStore>,
    /// Order store.
    pub orders: Arc<InMemoryOrderStore>,
    /// Hold store.
    pub holds: Arc<InMemoryHoldStore>,
    /// Block store.
    pub blocks: Arc<InMemoryBlockStore>,
    /// Audit log store.
    pub logs: Arc<InMemoryLogStore>,
    /// Clock pinned to `2025-01-01T00:00:00Z`.
    pub clock: Arc<FixedClock>,
}

impl TestStores {
    /// Creates empty stores with the clock pinned to the test epoch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            configs: Arc::new(InMemoryEventConfigStore::new()),
            layouts: Arc::new(InMemoryLayoutStore::new()),
            orders: Arc::new(InMemoryOrderStore::new()),
            holds: Arc::new(InMemoryHoldStore::new()),
            blocks: Arc::new(InMemoryBlockStore::new()),
            logs: Arc::new(InMemoryLogStore::new()),
            clock: Arc::new(test_clock()),
        }
    }

    /// Builds an [`InventoryService`] backed by this bundle's stores.
    #[must_use]
    pub fn service(&self) -> InventoryService {
        InventoryService::new(
            self.configs.clone(),
            self.layouts.clone(),
            self.orders.clone(),
            self.holds.clone(),
            self.blocks.clone(),
            self.logs.clone(),
            self.clock.clone(),
        )
    }
}

impl Default for TestStores {
    fn default() -> Self {
        Self::new()
    }
}
