//! Domain types for ticket-inventory reconciliation.
//!
//! This module contains the identifiers, external record shapes (event
//! configuration, layout geometry, orders, holds), the records this core owns
//! (blocks and audit logs), and the derived summary views that are recomputed
//! on every read and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event, minted by the upstream event catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Creates an `EventId` from an upstream document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a GA tier.
///
/// Canonical tier ids come from the event configuration; labels that resolve
/// to no configured tier become synthetic ids carrying the literal label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TierId(String);

impl TierId {
    /// Creates a `TierId` from an upstream id or a synthetic label.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a seating layout document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutId(String);

impl LayoutId {
    /// Creates a `LayoutId` from an upstream document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an inventory block. Minted by this core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Creates a new random `BlockId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `BlockId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an audit log entry. Minted by this core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogId(Uuid);

impl LogId {
    /// Creates a new random `LogId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `LogId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical coordinate of one reserved seat: section, row, seat number.
///
/// Orders, holds, and blocks all address seats by this coordinate; the
/// canonical rendering is `section-row-seat` (e.g. `A-1-5`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatKey {
    /// Section name (e.g. "A", "Balcony").
    pub section: String,
    /// Row label within the section.
    pub row: String,
    /// Seat number within the row.
    pub seat: String,
}

impl SeatKey {
    /// Creates a seat coordinate.
    #[must_use]
    pub fn new(section: impl Into<String>, row: impl Into<String>, seat: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            row: row.into(),
            seat: seat.into(),
        }
    }
}

impl fmt::Display for SeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.section, self.row, self.seat)
    }
}

// ============================================================================
// Money (cents-based to avoid floating point errors)
// ============================================================================

/// Represents a seat or tier price in cents to avoid floating-point errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Event configuration (external, read-only)
// ============================================================================

/// A tier definition from the event's explicit ticket-type list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeDef {
    /// Tier id.
    pub id: TierId,
    /// Display name (the key orders reference tiers by).
    pub name: String,
    /// Declared capacity for this tier.
    pub capacity: u32,
    /// Price per ticket, when configured.
    pub price: Option<Money>,
}

/// A tier definition from the event's legacy pricing-tier list.
///
/// Same information as [`TicketTypeDef`], kept separate because the two
/// sources drift independently upstream and conflict resolution between them
/// is part of the observed behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTierDef {
    /// Tier id.
    pub id: TierId,
    /// Display name.
    pub name: String,
    /// Declared capacity for this tier.
    pub capacity: u32,
    /// Price per ticket, when configured.
    pub price: Option<Money>,
}

/// Event inventory configuration, read from the upstream event document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Event id.
    pub id: EventId,
    /// Explicit seating-type flag ("reserved", "general", ...), when set.
    pub seating_type: Option<String>,
    /// Layout-type field ("seated", "seat_map", ...), when set.
    pub layout_type: Option<String>,
    /// Reference to the full layout document, when one exists.
    pub layout_id: Option<LayoutId>,
    /// Flat declared capacity; used to synthesize a GA tier when no tiers
    /// are configured.
    pub total_capacity: u32,
    /// Explicit ticket-type definitions.
    pub ticket_types: Vec<TicketTypeDef>,
    /// Legacy pricing-tier definitions.
    pub pricing_tiers: Vec<PricingTierDef>,
    /// Lightweight section snapshot on the event itself. A summary only:
    /// it may carry row data but is not authoritative seat geometry.
    pub sections: Vec<LayoutSection>,
}

// ============================================================================
// Layout geometry (external, read-only)
// ============================================================================

/// One seat in a layout row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSeat {
    /// Seat number within the row.
    pub number: String,
    /// Seat-level price override.
    pub price: Option<Money>,
    /// Seat-level category override.
    pub category: Option<String>,
}

/// One row of seats in a layout section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRow {
    /// Row label ("1", "AA", ...).
    pub label: String,
    /// Row-level price, inherited by seats without their own.
    pub price: Option<Money>,
    /// Row-level category, inherited by seats without their own.
    pub category: Option<String>,
    /// Seats in this row.
    pub seats: Vec<LayoutSeat>,
}

/// One section of a layout (or of the event's lightweight snapshot).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSection {
    /// Section id.
    pub id: String,
    /// Section name (the coordinate orders address seats by).
    pub name: String,
    /// Declared capacity; meaningful for snapshot sections without row data.
    pub capacity: Option<u32>,
    /// Section-level price, inherited by rows and seats without their own.
    pub price: Option<Money>,
    /// Section-level category, inherited by rows and seats without their own.
    pub category: Option<String>,
    /// Rows in this section. Empty for summary-only snapshot sections.
    pub rows: Vec<LayoutRow>,
}

/// Authoritative seat geometry for a reserved-seating event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Layout document id.
    pub id: LayoutId,
    /// Sections, each holding rows of seats.
    pub sections: Vec<LayoutSection>,
}

// ============================================================================
// Orders (external, immutable once created)
// ============================================================================

/// Lifecycle status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Payment in flight; already counts as sold.
    Pending,
    /// Payment completed.
    Completed,
    /// Order confirmed by the box office.
    Confirmed,
    /// Order cancelled; does not count as sold.
    Cancelled,
    /// Order refunded; does not count as sold.
    Refunded,
}

impl OrderStatus {
    /// Whether this status counts toward sold inventory.
    #[must_use]
    pub const fn is_sold(self) -> bool {
        matches!(self, Self::Pending | Self::Completed | Self::Confirmed)
    }
}

/// One line item on an order.
///
/// GA items reference their tier through either (or both) of two legacy
/// fields: `ticket_type` carries a tier id, `tier_name` a display name.
/// Reserved items carry a seat coordinate instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Tier reference by id (legacy field one).
    pub ticket_type: Option<String>,
    /// Tier reference by display name (legacy field two).
    pub tier_name: Option<String>,
    /// Quantity purchased.
    pub quantity: u32,
    /// Seat coordinate for reserved-seating items.
    pub seat_info: Option<SeatKey>,
}

impl OrderItem {
    /// A GA item referencing its tier by id.
    #[must_use]
    pub fn by_ticket_type(ticket_type: impl Into<String>, quantity: u32) -> Self {
        Self {
            ticket_type: Some(ticket_type.into()),
            tier_name: None,
            quantity,
            seat_info: None,
        }
    }

    /// A GA item referencing its tier by display name.
    #[must_use]
    pub fn by_tier_name(tier_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            ticket_type: None,
            tier_name: Some(tier_name.into()),
            quantity,
            seat_info: None,
        }
    }

    /// A reserved-seating item for one seat.
    #[must_use]
    pub const fn for_seat(seat: SeatKey) -> Self {
        Self {
            ticket_type: None,
            tier_name: None,
            quantity: 1,
            seat_info: Some(seat),
        }
    }
}

/// A sold-order record. Source of truth for "sold".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Event this order belongs to.
    pub event_id: EventId,
    /// Order lifecycle status.
    pub status: OrderStatus,
    /// Primary line-item schema.
    pub items: Vec<OrderItem>,
    /// Secondary legacy schema; older orders carry seat info here.
    pub tickets: Vec<OrderItem>,
}

// ============================================================================
// Holds (external, time-bound)
// ============================================================================

/// What a hold reserves: a GA quantity or one specific seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldTarget {
    /// Quantity held against a tier, referenced by id or display name.
    Tier {
        /// Tier reference (id or display name; resolved like order items).
        tier: String,
        /// Held quantity.
        quantity: u32,
    },
    /// One held seat.
    Seat(SeatKey),
}

/// A time-limited soft reservation created during checkout.
///
/// Holds are lazily expired: a hold counts only while `held_until` is in the
/// future at read time. No cleanup job exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hold {
    /// Event this hold belongs to.
    pub event_id: EventId,
    /// Expiry timestamp.
    pub held_until: DateTime<Utc>,
    /// What is held.
    pub target: HoldTarget,
}

impl Hold {
    /// Whether the hold still counts at the given instant.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.held_until > now
    }
}

// ============================================================================
// Blocks (owned by this core)
// ============================================================================

/// What a block withholds: a GA quantity or one specific seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTarget {
    /// Quantity withheld from a GA tier.
    Ga {
        /// Tier the quantity is withheld from.
        tier_id: TierId,
        /// Withheld quantity.
        quantity: u32,
    },
    /// One withheld seat.
    Seat(SeatKey),
}

/// Lifecycle status of a block.
///
/// A block is created `Active` and transitions at most once to `Released`.
/// Blocks are never deleted and never re-activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    /// The block currently withholds inventory.
    Active,
    /// The block has been released; kept as immutable history.
    Released,
}

/// An admin-initiated withholding of inventory, independent of the sales
/// pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block id.
    pub id: BlockId,
    /// Event the inventory belongs to.
    pub event_id: EventId,
    /// What is withheld.
    pub target: BlockTarget,
    /// Why the inventory was withheld.
    pub reason: String,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// Actor who created the block.
    pub blocked_by: String,
    /// When the block was created.
    pub blocked_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: BlockStatus,
    /// Actor who released the block, once released.
    pub released_by: Option<String>,
    /// When the block was released, once released.
    pub released_at: Option<DateTime<Utc>>,
}

impl Block {
    /// Whether the block currently withholds inventory.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BlockStatus::Active
    }

    /// The inventory kind this block applies to.
    #[must_use]
    pub const fn kind(&self) -> InventoryKind {
        match self.target {
            BlockTarget::Ga { .. } => InventoryKind::GeneralAdmission,
            BlockTarget::Seat(_) => InventoryKind::Reserved,
        }
    }
}

// ============================================================================
// Audit log (owned by this core, append-only)
// ============================================================================

/// The mutation an audit entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAction {
    /// A single block was created.
    Block,
    /// Multiple seat blocks were created as one group.
    BulkBlock,
    /// One or more blocks were released.
    Unblock,
    /// Tier capacity was increased.
    AddCapacity,
    /// Tier capacity was decreased.
    RemoveCapacity,
}

impl LogAction {
    /// Stable string form used for persistence and filtering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::BulkBlock => "bulk_block",
            Self::Unblock => "unblock",
            Self::AddCapacity => "add_capacity",
            Self::RemoveCapacity => "remove_capacity",
        }
    }
}

/// Which inventory model an entry or summary concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryKind {
    /// Quantity-based GA tiers.
    GeneralAdmission,
    /// Seat-based reserved seating.
    Reserved,
}

impl InventoryKind {
    /// Stable string form used for persistence and filtering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralAdmission => "ga",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only audit record of an inventory mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLog {
    /// Log entry id.
    pub id: LogId,
    /// Event the mutation applied to.
    pub event_id: EventId,
    /// What kind of mutation happened.
    pub action: LogAction,
    /// Which inventory model it concerned.
    pub kind: InventoryKind,
    /// Quantity delta (negative for releases and capacity removals).
    pub quantity_change: i64,
    /// Value before the mutation, where applicable (capacity changes).
    pub previous_value: Option<i64>,
    /// Value after the mutation, where applicable (capacity changes).
    pub new_value: Option<i64>,
    /// Operator-supplied reason.
    pub reason: String,
    /// Actor identity.
    pub performed_by: String,
    /// When the mutation happened.
    pub performed_at: DateTime<Utc>,
}

// ============================================================================
// Derived views (never persisted, always recomputed)
// ============================================================================

/// Classification of one reserved seat's saleability at query time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    /// Not sold, not held, not blocked.
    Available,
    /// A sellable order references this seat.
    Sold,
    /// A non-expired hold references this seat.
    Held,
    /// An active block withholds this seat.
    Blocked,
}

/// Reconciled counts for one GA tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaTierInventory {
    /// Canonical tier id (synthetic for unconfigured labels).
    pub tier_id: TierId,
    /// Display name.
    pub name: String,
    /// Declared capacity (zero for synthetic tiers).
    pub capacity: u32,
    /// Quantity sold via orders.
    pub sold: u32,
    /// Quantity withheld by active blocks.
    pub blocked: u32,
    /// Quantity under non-expired holds.
    pub held: u32,
    /// `max(0, capacity - sold - blocked - held)`.
    pub available: u32,
}

/// Reconciled status of one reserved seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInventory {
    /// Seat coordinate.
    pub seat: SeatKey,
    /// Status under the precedence `sold > blocked > held > available`.
    pub status: SeatStatus,
    /// Reason of the active block, when blocked.
    pub block_reason: Option<String>,
    /// Id of the active block, when blocked.
    pub block_id: Option<BlockId>,
    /// Price inherited seat → row → section, first non-null wins.
    pub price: Option<Money>,
    /// Category inherited seat → row → section, first non-null wins.
    pub category: Option<String>,
}

/// Aggregate counts for a tier, a section, or a whole event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTotals {
    /// Total capacity.
    pub capacity: u32,
    /// Sold count.
    pub sold: u32,
    /// Blocked count.
    pub blocked: u32,
    /// Held count.
    pub held: u32,
    /// `max(0, capacity - sold - blocked - held)`.
    pub available: u32,
}

impl InventoryTotals {
    /// Folds another set of counts into this one.
    pub fn absorb(&mut self, other: Self) {
        self.capacity += other.capacity;
        self.sold += other.sold;
        self.blocked += other.blocked;
        self.held += other.held;
        self.available += other.available;
    }
}

/// Reconciled per-seat view of one section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInventory {
    /// Section id.
    pub id: String,
    /// Section name.
    pub name: String,
    /// Per-section totals.
    pub totals: InventoryTotals,
    /// Every seat in the section, classified.
    pub seats: Vec<SeatInventory>,
}

/// Per-model detail of an event summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryDetail {
    /// Per-tier counts for a quantity-based event.
    GeneralAdmission(Vec<GaTierInventory>),
    /// Per-seat status for a seat-based event.
    Reserved(Vec<SectionInventory>),
}

/// The reconciled inventory picture for one event at one instant.
///
/// Always rebuilt from source data; never cached or persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInventorySummary {
    /// Event id.
    pub event_id: EventId,
    /// Which inventory model the event was classified as.
    pub kind: InventoryKind,
    /// Per-tier or per-seat detail.
    pub detail: SummaryDetail,
    /// Event-wide totals.
    pub totals: InventoryTotals,
    /// When this summary was computed.
    pub generated_at: DateTime<Utc>,
}

impl EventInventorySummary {
    /// GA tier rows, when this is a GA summary.
    #[must_use]
    pub const fn ga_tiers(&self) -> Option<&Vec<GaTierInventory>> {
        match &self.detail {
            SummaryDetail::GeneralAdmission(tiers) => Some(tiers),
            SummaryDetail::Reserved(_) => None,
        }
    }

    /// Section rows, when this is a reserved summary.
    #[must_use]
    pub const fn sections(&self) -> Option<&Vec<SectionInventory>> {
        match &self.detail {
            SummaryDetail::Reserved(sections) => Some(sections),
            SummaryDetail::GeneralAdmission(_) => None,
        }
    }

    /// Looks up one GA tier by id.
    #[must_use]
    pub fn find_tier(&self, tier_id: &TierId) -> Option<&GaTierInventory> {
        self.ga_tiers()
            .and_then(|tiers| tiers.iter().find(|t| t.tier_id == *tier_id))
    }

    /// Looks up one seat across all sections.
    #[must_use]
    pub fn find_seat(&self, seat: &SeatKey) -> Option<&SeatInventory> {
        self.sections().and_then(|sections| {
            sections
                .iter()
                .flat_map(|s| s.seats.iter())
                .find(|s| s.seat == *seat)
        })
    }
}
