//! Summary reconciliation tests.
//!
//! Exercises the full read path through `InventoryService`: event
//! classification, GA tier merging, reserved seat classification, lazy hold
//! expiry, and infrastructure-error propagation.
//!
//! Run with: `cargo test --test summary_reconciliation_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use ticket_inventory_core::{
    Clock, EventId, InventoryError, InventoryKind, SeatKey, SeatStatus,
};
use ticket_inventory_testing::fixtures::{
    ga_order, grid_section, layout, seat_hold, seat_order, snapshot_section, tier_hold,
    EventConfigBuilder,
};
use ticket_inventory_testing::TestStores;

#[tokio::test]
async fn ga_summary_merges_orders_and_holds() {
    let stores = TestStores::new();
    let now = stores.clock.now();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .ticket_type("ga", "General Admission", 100)
            .build(),
    );
    stores.orders.insert(ga_order("ev-1", "ga", 30));
    stores.holds.insert(tier_hold("ev-1", "ga", 10, now, 15));

    let service = stores.service();
    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();

    assert_eq!(summary.kind, InventoryKind::GeneralAdmission);
    let tiers = summary.ga_tiers().unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0].capacity, 100);
    assert_eq!(tiers[0].sold, 30);
    assert_eq!(tiers[0].held, 10);
    assert_eq!(tiers[0].available, 60);
    assert_eq!(summary.totals.available, 60);
    assert_eq!(summary.generated_at, now);
}

#[tokio::test]
async fn expired_holds_release_availability() {
    let stores = TestStores::new();
    let now = stores.clock.now();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .ticket_type("ga", "General Admission", 50)
            .build(),
    );
    stores.holds.insert(tier_hold("ev-1", "ga", 10, now, -1));

    let service = stores.service();
    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();

    let tier = &summary.ga_tiers().unwrap()[0];
    assert_eq!(tier.held, 0);
    assert_eq!(tier.available, 50);
}

#[tokio::test]
async fn tierless_event_synthesizes_general_tier() {
    let stores = TestStores::new();
    stores
        .configs
        .insert(EventConfigBuilder::new("ev-1").total_capacity(200).build());
    stores.orders.insert(ga_order("ev-1", "general", 25));

    let service = stores.service();
    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();

    let tiers = summary.ga_tiers().unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0].name, "General");
    assert_eq!(tiers[0].capacity, 200);
    assert_eq!(tiers[0].sold, 25);
    assert_eq!(tiers[0].available, 175);
}

#[tokio::test]
async fn unknown_tier_labels_surface_as_zero_capacity_tiers() {
    let stores = TestStores::new();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .ticket_type("ga", "General Admission", 100)
            .build(),
    );
    stores.orders.insert(ga_order("ev-1", "mystery-tier", 4));

    let service = stores.service();
    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();

    let tiers = summary.ga_tiers().unwrap();
    let mystery = tiers.iter().find(|t| t.name == "mystery-tier").unwrap();
    assert_eq!(mystery.capacity, 0);
    assert_eq!(mystery.sold, 4);
    assert_eq!(mystery.available, 0);
}

#[tokio::test]
async fn reserved_summary_classifies_seats_from_layout() {
    let stores = TestStores::new();
    let now = stores.clock.now();
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
        .orders
        .insert(seat_order("ev-1", vec![SeatKey::new("A", "1", "5")]));
    stores
        .holds
        .insert(seat_hold("ev-1", SeatKey::new("A", "2", "1"), now, 15));

    let service = stores.service();
    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();

    assert_eq!(summary.kind, InventoryKind::Reserved);
    assert_eq!(
        summary.find_seat(&SeatKey::new("A", "1", "5")).unwrap().status,
        SeatStatus::Sold
    );
    assert_eq!(
        summary.find_seat(&SeatKey::new("A", "2", "1")).unwrap().status,
        SeatStatus::Held
    );
    assert_eq!(summary.totals.capacity, 10);
    assert_eq!(summary.totals.sold, 1);
    assert_eq!(summary.totals.held, 1);
    assert_eq!(summary.totals.available, 8);
}

#[tokio::test]
async fn missing_layout_falls_back_to_config_snapshot() {
    let stores = TestStores::new();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .seating_type("reserved")
            .layout_id("layout-missing")
            .section(snapshot_section("Balcony", 40))
            .build(),
    );

    let service = stores.service();
    let summary = service.get_summary(&EventId::new("ev-1")).await.unwrap();

    assert_eq!(summary.kind, InventoryKind::Reserved);
    let sections = summary.sections().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].name, "Balcony");
    assert_eq!(sections[0].totals.capacity, 40);
    assert_eq!(sections[0].totals.available, 40);
    assert!(sections[0].seats.is_empty());
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let stores = TestStores::new();
    let service = stores.service();

    let err = service
        .get_summary(&EventId::new("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(_)));
}

#[tokio::test]
async fn store_failures_propagate_on_reads() {
    let stores = TestStores::new();
    stores
        .configs
        .insert(EventConfigBuilder::new("ev-1").total_capacity(10).build());
    stores.orders.fail_next_call();

    let service = stores.service();
    let err = service
        .get_summary(&EventId::new("ev-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Store(_)));
}

#[tokio::test]
async fn filtered_seats_rejects_ga_events() {
    let stores = TestStores::new();
    stores
        .configs
        .insert(EventConfigBuilder::new("ev-1").total_capacity(10).build());

    let service = stores.service();
    let err = service
        .get_filtered_seats(
            &EventId::new("ev-1"),
            &ticket_inventory_core::SeatFilter::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));
}

#[tokio::test]
async fn filtered_seats_narrows_by_status_and_section() {
    let stores = TestStores::new();
    stores.configs.insert(
        EventConfigBuilder::new("ev-1")
            .seating_type("reserved")
            .layout_id("layout-1")
            .build(),
    );
    stores.layouts.insert(layout(
        "layout-1",
        vec![grid_section("A", 1, 3, None), grid_section("B", 1, 3, None)],
    ));
    stores
        .orders
        .insert(seat_order("ev-1", vec![SeatKey::new("A", "1", "2")]));

    let service = stores.service();
    let sold = service
        .get_filtered_seats(
            &EventId::new("ev-1"),
            &ticket_inventory_core::SeatFilter {
                status: Some(SeatStatus::Sold),
                section: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0].seat, SeatKey::new("A", "1", "2"));

    let section_b = service
        .get_filtered_seats(
            &EventId::new("ev-1"),
            &ticket_inventory_core::SeatFilter {
                status: Some(SeatStatus::Available),
                section: Some("B".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(section_b.len(), 3);
}
