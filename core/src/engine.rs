//! Reconciliation engine: seating classification and summary assembly.
//!
//! The engine is pure: it operates on sources the service has already
//! fetched, so every branch is unit-testable without a store. Summaries are
//! always recomputed from source data and never cached.

use crate::adapter::{holds_at, sales_from_orders};
use crate::ga::build_ga;
use crate::reserved::build_reserved;
use crate::tiers::TierCatalog;
use crate::types::{
    Block, EventConfig, EventInventorySummary, Hold, InventoryKind, Layout, Order, SummaryDetail,
};
use chrono::{DateTime, Utc};

/// Everything a summary build reads, fetched up front by the service.
#[derive(Clone, Debug)]
pub struct SummarySources {
    /// The event's inventory configuration.
    pub config: EventConfig,
    /// Full layout geometry, when the event references one and it exists.
    pub layout: Option<Layout>,
    /// Every order for the event (all statuses).
    pub orders: Vec<Order>,
    /// Every hold for the event (expired or not).
    pub holds: Vec<Hold>,
    /// Active blocks for the event.
    pub blocks: Vec<Block>,
}

/// Classifies an event's seating model from four independent signals.
///
/// Best-effort and non-exclusive: any positive signal selects reserved
/// seating, none selects GA. The signals are an explicit `seating_type`
/// flag, a seat-oriented `layout_type`, the presence of a layout reference,
/// and structural row data in the event's section snapshot.
#[must_use]
pub fn classify(config: &EventConfig) -> InventoryKind {
    let flag_says_reserved = config
        .seating_type
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("reserved"));

    let layout_type_says_reserved = config.layout_type.as_deref().is_some_and(|s| {
        let s = s.to_lowercase();
        s.contains("seat") || s.contains("reserved")
    });

    let has_layout_reference = config.layout_id.is_some();

    let snapshot_has_rows = config.sections.iter().any(|s| !s.rows.is_empty());

    if flag_says_reserved || layout_type_says_reserved || has_layout_reference || snapshot_has_rows
    {
        InventoryKind::Reserved
    } else {
        InventoryKind::GeneralAdmission
    }
}

/// Assembles a summary from pre-fetched sources at the instant `now`.
///
/// Dispatches to the GA or reserved builder per [`classify`]. For reserved
/// events the full layout is authoritative; the event's own section snapshot
/// is only a fallback, since it lacks seat-level detail for older events.
#[must_use]
pub fn build_summary(sources: &SummarySources, now: DateTime<Utc>) -> EventInventorySummary {
    let kind = classify(&sources.config);
    let sales = sales_from_orders(&sources.orders);
    let holds = holds_at(&sources.holds, now);

    let (detail, totals) = match kind {
        InventoryKind::GeneralAdmission => {
            let catalog = TierCatalog::from_config(&sources.config);
            let (tiers, totals) = build_ga(&catalog, &sales, &holds, &sources.blocks);
            (SummaryDetail::GeneralAdmission(tiers), totals)
        }
        InventoryKind::Reserved => {
            let geometry = sources
                .layout
                .as_ref()
                .map_or(&sources.config.sections, |layout| &layout.sections);
            let (sections, totals) = build_reserved(geometry, &sales, &holds, &sources.blocks);
            (SummaryDetail::Reserved(sections), totals)
        }
    };

    EventInventorySummary {
        event_id: sources.config.id.clone(),
        kind,
        detail,
        totals,
        generated_at: now,
    }
}
