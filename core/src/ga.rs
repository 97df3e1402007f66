//! GA (quantity-based) inventory builder.
//!
//! Produces per-tier counts by resolving every sold and held quantity
//! through the tier catalog, adding blocked quantities from active GA
//! blocks, and flooring availability at zero.

use crate::adapter::{HoldLedger, SalesLedger};
use crate::tiers::TierCatalog;
use crate::types::{Block, BlockTarget, GaTierInventory, InventoryTotals, TierId};
use std::collections::HashMap;

/// `max(0, capacity - sold - blocked - held)`, overflow-safe.
#[must_use]
pub fn availability(capacity: u32, sold: u32, blocked: u32, held: u32) -> u32 {
    let used = u64::from(sold) + u64::from(blocked) + u64::from(held);
    #[allow(clippy::cast_possible_truncation)] // bounded by capacity
    if used >= u64::from(capacity) {
        0
    } else {
        (u64::from(capacity) - used) as u32
    }
}

/// Builds the per-tier GA view plus event totals.
///
/// Tiers come out in catalog declaration order, followed by synthetic tiers
/// (labels that resolved to no configured tier but carry sold/held/blocked
/// quantity), sorted by id for determinism. Synthetic tiers surface with
/// zero capacity so demand against a missing tier stays visible.
#[must_use]
pub fn build_ga(
    catalog: &TierCatalog,
    sales: &SalesLedger,
    holds: &HoldLedger,
    blocks: &[Block],
) -> (Vec<GaTierInventory>, InventoryTotals) {
    let mut sold: HashMap<TierId, u32> = HashMap::new();
    for (label, quantity) in &sales.ga {
        let entry = sold.entry(catalog.resolve(label)).or_insert(0);
        *entry = entry.saturating_add(*quantity);
    }

    let mut held: HashMap<TierId, u32> = HashMap::new();
    for (label, quantity) in &holds.ga {
        let entry = held.entry(catalog.resolve(label)).or_insert(0);
        *entry = entry.saturating_add(*quantity);
    }

    let mut blocked: HashMap<TierId, u32> = HashMap::new();
    for block in blocks {
        if !block.is_active() {
            continue;
        }
        if let BlockTarget::Ga { tier_id, quantity } = &block.target {
            let entry = blocked.entry(tier_id.clone()).or_insert(0);
            *entry = entry.saturating_add(*quantity);
        }
    }

    let mut tiers = Vec::new();
    for (tier_id, def) in catalog.iter() {
        let s = sold.remove(tier_id).unwrap_or(0);
        let b = blocked.remove(tier_id).unwrap_or(0);
        let h = held.remove(tier_id).unwrap_or(0);
        tiers.push(GaTierInventory {
            tier_id: tier_id.clone(),
            name: def.name.clone(),
            capacity: def.capacity,
            sold: s,
            blocked: b,
            held: h,
            available: availability(def.capacity, s, b, h),
        });
    }

    // Leftover labels resolved to no configured tier: surface them as
    // zero-capacity synthetic tiers rather than dropping the quantities.
    let mut synthetic: Vec<TierId> = sold
        .keys()
        .chain(blocked.keys())
        .chain(held.keys())
        .cloned()
        .collect();
    synthetic.sort();
    synthetic.dedup();
    for tier_id in synthetic {
        let s = sold.get(&tier_id).copied().unwrap_or(0);
        let b = blocked.get(&tier_id).copied().unwrap_or(0);
        let h = held.get(&tier_id).copied().unwrap_or(0);
        tiers.push(GaTierInventory {
            name: tier_id.as_str().to_string(),
            tier_id,
            capacity: 0,
            sold: s,
            blocked: b,
            held: h,
            available: 0,
        });
    }

    let mut totals = InventoryTotals::default();
    for tier in &tiers {
        totals.absorb(InventoryTotals {
            capacity: tier.capacity,
            sold: tier.sold,
            blocked: tier.blocked,
            held: tier.held,
            available: tier.available,
        });
    }

    (tiers, totals)
}
