//! Capacity adjuster: mutating tier capacity under the sold-plus-blocked
//! floor.

use crate::error::InventoryError;
use crate::service::{InventoryService, MutationOutcome};
use crate::tiers::TierCatalog;
use crate::types::{EventId, InventoryKind, InventoryLog, LogAction, LogId, TierId};

/// Request to change one tier's capacity by a signed delta.
#[derive(Clone, Debug)]
pub struct CapacityAdjustment {
    /// Event whose tier is adjusted.
    pub event_id: EventId,
    /// Tier to adjust.
    pub tier_id: TierId,
    /// Signed capacity change; negative deltas are checked against the
    /// `sold + blocked` floor.
    pub delta: i64,
    /// Why the capacity changed.
    pub reason: String,
    /// Actor performing the adjustment.
    pub actor: String,
}

pub(crate) async fn adjust(
    svc: &InventoryService,
    req: CapacityAdjustment,
) -> Result<MutationOutcome, InventoryError> {
    if req.delta == 0 {
        return Err(InventoryError::validation("capacity delta must be non-zero"));
    }

    let config = svc
        .config_store
        .fetch_event(&req.event_id)
        .await?
        .ok_or_else(|| InventoryError::not_found(format!("event {}", req.event_id)))?;
    let catalog = TierCatalog::from_config(&config);
    let current = i64::from(
        catalog
            .get(&req.tier_id)
            .ok_or_else(|| InventoryError::not_found(format!("tier {}", req.tier_id)))?
            .capacity,
    );
    // Checked arithmetic: the persisted capacity is u32, so any result
    // outside that range is rejected rather than wrapped or truncated.
    let new_capacity = current
        .checked_add(req.delta)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            InventoryError::validation(format!(
                "capacity of tier '{}' must stay within 0..={} (current {}, delta {})",
                req.tier_id,
                u32::MAX,
                current,
                req.delta
            ))
        })?;

    if req.delta < 0 {
        // Shrinking must not strand sold or blocked inventory; check against
        // a fresh summary rather than trusting any cached count.
        let summary = svc.get_summary(&req.event_id).await?;
        let (sold, blocked) = summary
            .find_tier(&req.tier_id)
            .map_or((0, 0), |t| (t.sold, t.blocked));
        let floor = i64::from(sold) + i64::from(blocked);
        if i64::from(new_capacity) < floor {
            return Err(InventoryError::validation(format!(
                "cannot reduce capacity of tier '{}' below {} (sold {} + blocked {}); requested capacity {}",
                req.tier_id, floor, sold, blocked, new_capacity
            )));
        }
    }

    svc.config_store
        .update_tier_capacity(&req.event_id, &req.tier_id, new_capacity)
        .await?;

    let now = svc.clock.now();
    let action = if req.delta > 0 {
        LogAction::AddCapacity
    } else {
        LogAction::RemoveCapacity
    };
    let log = InventoryLog {
        id: LogId::new(),
        event_id: req.event_id,
        action,
        kind: InventoryKind::GeneralAdmission,
        quantity_change: req.delta,
        previous_value: Some(current),
        new_value: Some(i64::from(new_capacity)),
        reason: req.reason,
        performed_by: req.actor,
        performed_at: now,
    };
    svc.log_store.append(&log).await?;

    tracing::debug!(
        tier_id = %req.tier_id,
        previous = current,
        new = new_capacity,
        "tier capacity adjusted"
    );

    Ok(MutationOutcome::succeeded(format!(
        "Capacity of tier '{}' changed from {} to {}",
        req.tier_id, current, new_capacity
    ))
    .with_log(log.id))
}
