//! # Ticket Inventory Core
//!
//! Read-time ticket-inventory reconciliation: how many tickets (GA tiers)
//! or which individual seats (reserved seating) are sold, held, blocked, or
//! available for an event, computed by merging independently-evolving data
//! sources with no single authoritative aggregate.
//!
//! # Architecture
//!
//! ```text
//! Read-only sources                 Owned stores
//! ┌──────────────┐ ┌────────────┐   ┌──────────────┐ ┌──────────────┐
//! │ Event config │ │   Layout   │   │    Blocks    │ │  Audit logs  │
//! │ Orders/Holds │ │  geometry  │   │ (active/rel.)│ │ (append-only)│
//! └──────┬───────┘ └─────┬──────┘   └──────┬───────┘ └──────┬───────┘
//!        └───────────────┴─────────────────┴────────────────┘
//!                                │
//!                                ▼
//!                     ┌─────────────────────┐
//!                     │ Reconciliation      │  classify seating,
//!                     │ engine (pure)       │  dispatch to builder
//!                     └──────────┬──────────┘
//!                     ┌──────────┴──────────┐
//!                     ▼                     ▼
//!              ┌────────────┐        ┌────────────┐
//!              │ GA builder │        │  Reserved  │
//!              │ (per tier) │        │ (per seat) │
//!              └────────────┘        └────────────┘
//! ```
//!
//! Summaries are always recomputed from source data, never cached: mutating
//! operations (capacity adjustment, block create/release) first compute a
//! fresh summary to validate the request, then write the owned stores and
//! append exactly one audit entry.
//!
//! # Key invariants
//!
//! - `available = max(0, capacity − sold − blocked − held)` per tier and
//!   section.
//! - Every seat has exactly one status with precedence
//!   `sold > blocked > held > available`.
//! - Capacity never drops below `sold + blocked` for a tier.
//! - A block is created active, transitions at most once to released, and
//!   produces at most two audit entries over its lifetime.
//!
//! # Usage
//!
//! Wire an [`InventoryService`] over the store traits in [`store`] (postgres
//! implementations of the owned stores live in `ticket-inventory-postgres`;
//! in-memory implementations of everything live in
//! `ticket-inventory-testing`) and call the operation surface:
//! [`InventoryService::get_summary`], [`InventoryService::block_ga`],
//! [`InventoryService::block_seats`], [`InventoryService::adjust_capacity`],
//! [`InventoryService::get_logs`], and friends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod audit;
pub mod blocks;
pub mod capacity;
pub mod engine;
pub mod environment;
pub mod error;
pub mod ga;
pub mod reserved;
pub mod service;
pub mod store;
pub mod tiers;
pub mod types;

pub use audit::{LogFilter, DEFAULT_LOG_LIMIT};
pub use blocks::{GaBlockRequest, SeatBlockRequest};
pub use capacity::CapacityAdjustment;
pub use engine::{build_summary, classify, SummarySources};
pub use environment::{Clock, SystemClock};
pub use error::{InventoryError, StoreError};
pub use reserved::SeatFilter;
pub use service::{InventoryService, MutationOutcome};
pub use store::{
    BlockStore, EventConfigStore, HoldStore, LayoutStore, LogStore, OrderStore,
};
pub use tiers::{TierCatalog, TierDef};
pub use types::*;
