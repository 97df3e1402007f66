//! Block manager: creating and releasing withheld inventory.
//!
//! Every operation validates against a freshly computed summary, writes the
//! block store, and appends exactly one audit entry. GA blocks withhold a
//! quantity from a tier; seat blocks withhold specific seats. Seat blocking
//! is all-or-nothing; seat unblocking has documented partial-success
//! semantics.

use crate::error::InventoryError;
use crate::service::{InventoryService, MutationOutcome};
use crate::types::{
    Block, BlockId, BlockStatus, BlockTarget, EventId, InventoryKind, InventoryLog, LogAction,
    LogId, SeatKey, SeatStatus, TierId,
};
use std::collections::HashSet;

/// Request to withhold a quantity from a GA tier.
#[derive(Clone, Debug)]
pub struct GaBlockRequest {
    /// Event to block inventory on.
    pub event_id: EventId,
    /// Tier to withhold from.
    pub tier_id: TierId,
    /// Quantity to withhold.
    pub quantity: u32,
    /// Why the inventory is withheld.
    pub reason: String,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// Actor performing the block.
    pub actor: String,
}

/// Request to withhold specific seats.
#[derive(Clone, Debug)]
pub struct SeatBlockRequest {
    /// Event to block inventory on.
    pub event_id: EventId,
    /// Seats to withhold. All must currently be available.
    pub seats: Vec<SeatKey>,
    /// Why the seats are withheld.
    pub reason: String,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// Actor performing the block.
    pub actor: String,
}

pub(crate) async fn block_ga(
    svc: &InventoryService,
    req: GaBlockRequest,
) -> Result<MutationOutcome, InventoryError> {
    if req.quantity == 0 {
        return Err(InventoryError::validation(
            "block quantity must be greater than zero",
        ));
    }

    let summary = svc.get_summary(&req.event_id).await?;
    let tier = summary
        .find_tier(&req.tier_id)
        .ok_or_else(|| InventoryError::not_found(format!("tier {}", req.tier_id)))?;

    if req.quantity > tier.available {
        return Err(InventoryError::validation(format!(
            "insufficient availability for tier '{}': requested {}, available {}",
            tier.name, req.quantity, tier.available
        )));
    }

    let now = svc.clock.now();
    let block = Block {
        id: BlockId::new(),
        event_id: req.event_id.clone(),
        target: BlockTarget::Ga {
            tier_id: req.tier_id.clone(),
            quantity: req.quantity,
        },
        reason: req.reason.clone(),
        notes: req.notes,
        blocked_by: req.actor.clone(),
        blocked_at: now,
        status: BlockStatus::Active,
        released_by: None,
        released_at: None,
    };
    svc.block_store.insert_group(std::slice::from_ref(&block)).await?;

    let log = InventoryLog {
        id: LogId::new(),
        event_id: req.event_id,
        action: LogAction::Block,
        kind: InventoryKind::GeneralAdmission,
        quantity_change: i64::from(req.quantity),
        previous_value: None,
        new_value: None,
        reason: req.reason,
        performed_by: req.actor,
        performed_at: now,
    };
    svc.log_store.append(&log).await?;

    tracing::debug!(
        block_id = %block.id,
        tier_id = %req.tier_id,
        quantity = req.quantity,
        "ga inventory blocked"
    );

    Ok(MutationOutcome::succeeded(format!(
        "Blocked {} tickets on tier '{}'",
        req.quantity, tier.name
    ))
    .with_blocks(vec![block.id])
    .with_log(log.id))
}

pub(crate) async fn unblock_ga(
    svc: &InventoryService,
    event_id: EventId,
    block_id: BlockId,
    actor: String,
) -> Result<MutationOutcome, InventoryError> {
    let block = svc
        .block_store
        .fetch(&block_id)
        .await?
        .ok_or_else(|| InventoryError::not_found(format!("block {block_id}")))?;

    if block.event_id != event_id {
        return Err(InventoryError::not_found(format!(
            "block {block_id} for event {event_id}"
        )));
    }
    let BlockTarget::Ga { quantity, .. } = block.target else {
        return Err(InventoryError::TypeMismatch {
            expected: InventoryKind::GeneralAdmission,
            actual: block.kind(),
        });
    };
    if !block.is_active() {
        // Released blocks stay released; a second release must not succeed.
        return Err(InventoryError::validation(format!(
            "block {block_id} is already released"
        )));
    }

    let now = svc.clock.now();
    svc.block_store
        .release_group(&[block_id], &actor, now)
        .await?;

    let log = InventoryLog {
        id: LogId::new(),
        event_id,
        action: LogAction::Unblock,
        kind: InventoryKind::GeneralAdmission,
        quantity_change: -i64::from(quantity),
        previous_value: None,
        new_value: None,
        reason: block.reason,
        performed_by: actor,
        performed_at: now,
    };
    svc.log_store.append(&log).await?;

    Ok(MutationOutcome::succeeded(format!(
        "Released block {block_id} ({quantity} tickets)"
    ))
    .with_blocks(vec![block_id])
    .with_log(log.id))
}

pub(crate) async fn block_seats(
    svc: &InventoryService,
    mut req: SeatBlockRequest,
) -> Result<MutationOutcome, InventoryError> {
    if req.seats.is_empty() {
        return Err(InventoryError::validation("no seats requested"));
    }

    // A seat listed twice is one seat: blocking it must produce exactly one
    // block, or releasing could leave a phantom block on the seat.
    let mut seen = HashSet::new();
    req.seats.retain(|seat| seen.insert(seat.clone()));

    let summary = svc.get_summary(&req.event_id).await?;
    if summary.sections().is_none() {
        return Err(InventoryError::validation(format!(
            "event {} is not a reserved-seating event",
            req.event_id
        )));
    }

    // All-or-nothing: one unavailable seat rejects the whole request and no
    // block is created.
    let mut unavailable = Vec::new();
    for seat in &req.seats {
        match summary.find_seat(seat) {
            Some(s) if s.status == SeatStatus::Available => {}
            Some(s) => unavailable.push(format!("{} ({:?})", seat, s.status)),
            None => unavailable.push(format!("{seat} (unknown)")),
        }
    }
    if !unavailable.is_empty() {
        return Err(InventoryError::validation(format!(
            "seats not available: {}",
            unavailable.join(", ")
        )));
    }

    let now = svc.clock.now();
    let blocks: Vec<Block> = req
        .seats
        .iter()
        .map(|seat| Block {
            id: BlockId::new(),
            event_id: req.event_id.clone(),
            target: BlockTarget::Seat(seat.clone()),
            reason: req.reason.clone(),
            notes: req.notes.clone(),
            blocked_by: req.actor.clone(),
            blocked_at: now,
            status: BlockStatus::Active,
            released_by: None,
            released_at: None,
        })
        .collect();
    svc.block_store.insert_group(&blocks).await?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let count = blocks.len() as i64;
    let action = if blocks.len() == 1 {
        LogAction::Block
    } else {
        LogAction::BulkBlock
    };
    let log = InventoryLog {
        id: LogId::new(),
        event_id: req.event_id,
        action,
        kind: InventoryKind::Reserved,
        quantity_change: count,
        previous_value: None,
        new_value: None,
        reason: req.reason,
        performed_by: req.actor,
        performed_at: now,
    };
    svc.log_store.append(&log).await?;

    let ids: Vec<BlockId> = blocks.iter().map(|b| b.id).collect();
    tracing::debug!(count = ids.len(), "seats blocked");

    Ok(
        MutationOutcome::succeeded(format!("Blocked {} seat(s)", ids.len()))
            .with_blocks(ids)
            .with_log(log.id),
    )
}

pub(crate) async fn unblock_seats(
    svc: &InventoryService,
    event_id: EventId,
    block_ids: Vec<BlockId>,
    actor: String,
) -> Result<MutationOutcome, InventoryError> {
    if block_ids.is_empty() {
        return Err(InventoryError::validation("no blocks requested"));
    }

    // Partial-success semantics: silently skip ids that are missing, belong
    // to another event, are not seat blocks, or were already released. Only
    // an empty remainder fails the request.
    let mut releasable = Vec::new();
    for block_id in &block_ids {
        let Some(block) = svc.block_store.fetch(block_id).await? else {
            tracing::debug!(block_id = %block_id, "skipping unknown block");
            continue;
        };
        if block.event_id != event_id
            || block.kind() != InventoryKind::Reserved
            || !block.is_active()
        {
            tracing::debug!(block_id = %block_id, "skipping non-releasable block");
            continue;
        }
        releasable.push(*block_id);
    }

    if releasable.is_empty() {
        return Err(InventoryError::not_found(format!(
            "no releasable seat blocks among the {} requested",
            block_ids.len()
        )));
    }

    let now = svc.clock.now();
    svc.block_store
        .release_group(&releasable, &actor, now)
        .await?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let count = releasable.len() as i64;
    let log = InventoryLog {
        id: LogId::new(),
        event_id,
        action: LogAction::Unblock,
        kind: InventoryKind::Reserved,
        quantity_change: -count,
        previous_value: None,
        new_value: None,
        reason: "seat blocks released".to_string(),
        performed_by: actor,
        performed_at: now,
    };
    svc.log_store.append(&log).await?;

    Ok(MutationOutcome::succeeded(format!(
        "Released {} of {} block(s)",
        releasable.len(),
        block_ids.len()
    ))
    .with_blocks(releasable)
    .with_log(log.id))
}
