//! Reserved-seating (per-seat) inventory builder.
//!
//! Walks layout sections → rows → seats and classifies every seat with the
//! precedence `sold > blocked > held > available`. Price and category are
//! inherited seat → row → section, first non-null wins.

use crate::adapter::{HoldLedger, SalesLedger};
use crate::ga::availability;
use crate::types::{
    Block, BlockId, BlockTarget, InventoryTotals, LayoutSection, SeatInventory, SeatKey,
    SeatStatus, SectionInventory,
};
use std::collections::HashMap;

/// Secondary filter for [`filter_seats`].
#[derive(Clone, Debug, Default)]
pub struct SeatFilter {
    /// Keep only seats with this status.
    pub status: Option<SeatStatus>,
    /// Keep only seats in this section (matched by name).
    pub section: Option<String>,
}

/// Builds the per-section reserved view plus event totals.
///
/// `sections` is the authoritative layout geometry, or the event's
/// lightweight section snapshot when no layout document exists. Snapshot
/// sections without row data contribute their declared capacity as
/// available; there are no seats to classify.
#[must_use]
pub fn build_reserved(
    sections: &[LayoutSection],
    sales: &SalesLedger,
    holds: &HoldLedger,
    blocks: &[Block],
) -> (Vec<SectionInventory>, InventoryTotals) {
    let mut blocked: HashMap<&SeatKey, (BlockId, &str)> = HashMap::new();
    for block in blocks {
        if !block.is_active() {
            continue;
        }
        if let BlockTarget::Seat(seat) = &block.target {
            blocked.insert(seat, (block.id, block.reason.as_str()));
        }
    }

    let mut out = Vec::with_capacity(sections.len());
    let mut event_totals = InventoryTotals::default();

    for section in sections {
        let mut seats = Vec::new();
        let mut sold = 0u32;
        let mut held = 0u32;
        let mut blocked_count = 0u32;

        for row in &section.rows {
            for seat in &row.seats {
                let key = SeatKey::new(&section.name, &row.label, &seat.number);

                let mut block_reason = None;
                let mut block_id = None;
                let status = if sales.seats.contains(&key) {
                    sold += 1;
                    SeatStatus::Sold
                } else if let Some((id, reason)) = blocked.get(&key) {
                    blocked_count += 1;
                    block_id = Some(*id);
                    block_reason = Some((*reason).to_string());
                    SeatStatus::Blocked
                } else if holds.seats.contains(&key) {
                    held += 1;
                    SeatStatus::Held
                } else {
                    SeatStatus::Available
                };

                seats.push(SeatInventory {
                    seat: key,
                    status,
                    block_reason,
                    block_id,
                    price: seat.price.or(row.price).or(section.price),
                    category: seat
                        .category
                        .clone()
                        .or_else(|| row.category.clone())
                        .or_else(|| section.category.clone()),
                });
            }
        }

        #[allow(clippy::cast_possible_truncation)] // seat counts are small
        let capacity = if seats.is_empty() {
            section.capacity.unwrap_or(0)
        } else {
            seats.len() as u32
        };

        let totals = InventoryTotals {
            capacity,
            sold,
            blocked: blocked_count,
            held,
            available: availability(capacity, sold, blocked_count, held),
        };
        event_totals.absorb(totals);

        out.push(SectionInventory {
            id: section.id.clone(),
            name: section.name.clone(),
            totals,
            seats,
        });
    }

    (out, event_totals)
}

/// Applies a secondary status/section filter to an already-built view.
#[must_use]
pub fn filter_seats(sections: &[SectionInventory], filter: &SeatFilter) -> Vec<SeatInventory> {
    sections
        .iter()
        .filter(|section| {
            filter
                .section
                .as_ref()
                .is_none_or(|name| section.name == *name)
        })
        .flat_map(|section| section.seats.iter())
        .filter(|seat| filter.status.is_none_or(|status| seat.status == status))
        .cloned()
        .collect()
}
