//! Block manager tests.
//!
//! Covers GA and seat block lifecycles through `InventoryService`:
//! availability checks, all-or-nothing seat blocking, partial-success seat
//! release, double-release rejection, and error normalization into
//! `MutationOutcome`.
//!
//! Run with: `cargo test --test block_manager_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use ticket_inventory_core::{
    BlockId, BlockStatus, Clock, EventId, GaBlockRequest, SeatBlockRequest, SeatKey,
    SeatStatus, TierId,
};
use ticket_inventory_testing::fixtures::{
    ga_order, grid_section, layout, seat_order, tier_hold, EventConfigBuilder,
};
use ticket_inventory_testing::TestStores;

fn ga_request(quantity: u32) -> GaBlockRequest {
    GaBlockRequest {
        event_id: EventId::new("ev-1"),
        tier_id: TierId::new("ga"),
        quantity,
        reason: "press allotment".to_string(),
        notes: None,
        actor: "ops".to_string(),
    }
}

fn seat_request(seats: Vec<SeatKey>) -> SeatBlockRequest {
    SeatBlockRequest {
        event_id: EventId::new("ev-1"),
        seats,
        reason: "stage rigging".to_string(),
        notes: Some("tour production".to_string()),
        actor: "ops".to_string(),
    }
}

fn ga_stores() -> TestStores {
    let stores = TestStores::new();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .ticket_type("ga", "General Admission", 100)
            .build(),
    );
    stores
}

fn reserved_stores() -> TestStores {
    let stores = TestStores::new();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .seating_type("reserved")
            .layout_id("layout-1")
            .build(),
    );
    stores
        .layouts
        .insert(layout("layout-1", vec![grid_section("A", 2, 5, None)]));
    stores
}

#[tokio::test]
async fn ga_block_reduces_availability_and_logs() {
    let stores = ga_stores();
    let service = stores.service();

    let outcome = service.block_ga(ga_request(40)).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.block_ids.len(), 1);
    assert!(outcome.log_id.is_some());

    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();
    let tier = summary.find_tier(&TierId::new("ga")).unwrap();
    assert_eq!(tier.blocked, 40);
    assert_eq!(tier.available, 60);
    assert_eq!(stores.logs.len(), 1);
}

#[tokio::test]
async fn ga_block_cannot_exceed_availability() {
    let stores = ga_stores();
    let now = stores.clock.now();
    stores.orders.insert(ga_order("ev-1", "ga", 30));
    stores.holds.insert(tier_hold("ev-1", "ga", 10, now, 15));
    let service = stores.service();

    // 100 - 30 sold - 10 held leaves exactly 60.
    let outcome = service.block_ga(ga_request(60)).await;
    assert!(outcome.success, "{}", outcome.message);

    let outcome = service.block_ga(ga_request(1)).await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("insufficient availability"));
    assert!(outcome.block_ids.is_empty());
    assert_eq!(stores.logs.len(), 1);
}

#[tokio::test]
async fn ga_block_rejects_zero_quantity_and_unknown_tier() {
    let stores = ga_stores();
    let service = stores.service();

    let outcome = service.block_ga(ga_request(0)).await;
    assert!(!outcome.success);

    let mut req = ga_request(5);
    req.tier_id = TierId::new("vip");
    let outcome = service.block_ga(req).await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("not found"));
}

#[tokio::test]
async fn ga_unblock_restores_availability_once() {
    let stores = ga_stores();
    let service = stores.service();

    let outcome = service.block_ga(ga_request(25)).await;
    let block_id = outcome.block_ids[0];

    let outcome = service
        .unblock_ga(EventId::new("ev-1"), block_id, "ops")
        .await;
    assert!(outcome.success, "{}", outcome.message);

    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();
    assert_eq!(summary.find_tier(&TierId::new("ga")).unwrap().available, 100);

    // Releases are one-way; the history entry stays released.
    let outcome = service
        .unblock_ga(EventId::new("ev-1"), block_id, "ops")
        .await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("already released"));
}

#[tokio::test]
async fn ga_unblock_rejects_seat_blocks() {
    let stores = reserved_stores();
    let service = stores.service();

    let outcome = service
        .block_seats(seat_request(vec![SeatKey::new("A", "1", "1")]))
        .await;
    let block_id = outcome.block_ids[0];

    let outcome = service
        .unblock_ga(EventId::new("ev-1"), block_id, "ops")
        .await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("expected ga"));
}

#[tokio::test]
async fn seat_block_marks_seats_with_reason() {
    let stores = reserved_stores();
    let service = stores.service();

    let seats = vec![SeatKey::new("A", "1", "1"), SeatKey::new("A", "1", "2")];
    let outcome = service.block_seats(seat_request(seats.clone())).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.block_ids.len(), 2);

    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();
    for seat in &seats {
        let inv = summary.find_seat(seat).unwrap();
        assert_eq!(inv.status, SeatStatus::Blocked);
        assert_eq!(inv.block_reason.as_deref(), Some("stage rigging"));
        assert!(inv.block_id.is_some());
    }
    assert_eq!(summary.totals.blocked, 2);
}

#[tokio::test]
async fn duplicate_seats_in_one_request_produce_one_block() {
    let stores = reserved_stores();
    let service = stores.service();

    let seat = SeatKey::new("A", "1", "1");
    let outcome = service
        .block_seats(seat_request(vec![seat.clone(), seat.clone()]))
        .await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.block_ids.len(), 1);
    assert_eq!(stores.blocks.len(), 1);

    // Releasing that one block must leave the seat available again.
    let outcome = service
        .unblock_seats(EventId::new("ev-1"), outcome.block_ids, "ops")
        .await;
    assert!(outcome.success, "{}", outcome.message);

    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();
    assert_eq!(summary.find_seat(&seat).unwrap().status, SeatStatus::Available);
}

#[tokio::test]
async fn seat_block_is_all_or_nothing() {
    let stores = reserved_stores();
    stores
        .orders
        .insert(seat_order("ev-1", vec![SeatKey::new("A", "1", "5")]));
    let service = stores.service();

    let outcome = service
        .block_seats(seat_request(vec![
            SeatKey::new("A", "1", "4"),
            SeatKey::new("A", "1", "5"),
        ]))
        .await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("A-1-5"));
    assert!(stores.blocks.is_empty());
    assert!(stores.logs.is_empty());

    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();
    assert_eq!(
        summary.find_seat(&SeatKey::new("A", "1", "4")).unwrap().status,
        SeatStatus::Available
    );
}

#[tokio::test]
async fn seat_block_rejects_ga_events_and_unknown_seats() {
    let stores = ga_stores();
    let service = stores.service();
    let outcome = service
        .block_seats(seat_request(vec![SeatKey::new("A", "1", "1")]))
        .await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("not a reserved-seating event"));

    let stores = reserved_stores();
    let service = stores.service();
    let outcome = service
        .block_seats(seat_request(vec![SeatKey::new("Z", "9", "9")]))
        .await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("unknown"));
}

#[tokio::test]
async fn seat_unblock_releases_what_it_can() {
    let stores = reserved_stores();
    let service = stores.service();

    let outcome = service
        .block_seats(seat_request(vec![SeatKey::new("A", "1", "1")]))
        .await;
    let good = outcome.block_ids[0];
    let bogus = BlockId::new();

    let outcome = service
        .unblock_seats(EventId::new("ev-1"), vec![good, bogus], "ops")
        .await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.message, "Released 1 of 2 block(s)");
    assert_eq!(outcome.block_ids, vec![good]);

    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();
    assert_eq!(
        summary.find_seat(&SeatKey::new("A", "1", "1")).unwrap().status,
        SeatStatus::Available
    );
}

#[tokio::test]
async fn seat_unblock_fails_when_nothing_is_releasable() {
    let stores = reserved_stores();
    let service = stores.service();

    let outcome = service
        .unblock_seats(EventId::new("ev-1"), vec![BlockId::new()], "ops")
        .await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("no releasable seat blocks"));
}

#[tokio::test]
async fn blocks_endpoint_returns_full_history_newest_first() {
    let stores = ga_stores();
    let service = stores.service();

    let first = service.block_ga(ga_request(10)).await.block_ids[0];
    let second = service.block_ga(ga_request(5)).await.block_ids[0];
    service
        .unblock_ga(EventId::new("ev-1"), first, "ops")
        .await;

    let history = service.get_blocks(&EventId::new("ev-1")).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second);
    assert_eq!(history[1].id, first);
    assert_eq!(history[1].status, BlockStatus::Released);
    assert_eq!(history[1].released_by.as_deref(), Some("ops"));
}

#[tokio::test]
async fn store_failures_normalize_to_failed_outcomes() {
    let stores = ga_stores();
    let service = stores.service();

    stores.blocks.fail_next_call();
    let outcome = service.block_ga(ga_request(10)).await;
    assert!(!outcome.success);
    assert!(outcome.message.contains("injected failure"));
    assert!(stores.logs.is_empty());
}
