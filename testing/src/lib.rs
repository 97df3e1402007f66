//! # Ticket Inventory Testing
//!
//! Testing utilities for the ticket-inventory reconciliation engine.
//!
//! This crate provides:
//! - Deterministic in-memory implementations of every store trait
//! - A fixed clock for reproducible hold-expiry behavior
//! - Fixture builders for event configs, layouts, orders, and holds
//! - A harness bundling everything into a ready `InventoryService`
//!
//! ## Example
//!
//! ```
//! use ticket_inventory_testing::{fixtures::EventConfigBuilder, harness::TestStores};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let stores = TestStores::new();
//! stores
//!     .configs
//!     .insert(EventConfigBuilder::new("ev-1").total_capacity(100).build());
//!
//! let service = stores.service();
//! let summary = service
//!     .get_summary(&ticket_inventory_core::EventId::new("ev-1"))
//!     .await
//!     .unwrap();
//! assert_eq!(summary.totals.available, 100);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod harness;
pub mod mocks;
pub mod stores;

pub use harness::TestStores;
pub use mocks::{test_clock, FixedClock};
