//! Normalization of legacy order and hold schemas.
//!
//! Orders arrive in two line-item locations (`items` and the older
//! `tickets`), and GA items reference their tier through two legacy fields
//! (`ticket_type` by id, `tier_name` by display name). This adapter folds
//! all of that into one canonical input per event so the builders stay
//! schema-agnostic.
//!
//! The dual tier keyspace is deliberately preserved rather than merged: an
//! item contributes one GA entry per populated legacy field, so an item
//! carrying both fields can count twice for the same logical tier. That is
//! the observed upstream behavior and tests pin it down.

use crate::types::{Hold, HoldTarget, Order, SeatKey};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Canonical "sold" input for one event: GA label/quantity pairs plus the
/// set of sold seat coordinates.
#[derive(Clone, Debug, Default)]
pub struct SalesLedger {
    /// Raw tier labels with sold quantities, one entry per populated legacy
    /// field. Resolution against the tier catalog happens in the GA builder.
    pub ga: Vec<(String, u32)>,
    /// Seats referenced by sellable orders, across both line-item schemas.
    pub seats: HashSet<SeatKey>,
}

/// Canonical "held" input for one event, already filtered to non-expired
/// holds.
#[derive(Clone, Debug, Default)]
pub struct HoldLedger {
    /// Raw tier labels with held quantities.
    pub ga: Vec<(String, u32)>,
    /// Held seat coordinates.
    pub seats: HashSet<SeatKey>,
}

/// Folds sellable orders into a [`SalesLedger`].
///
/// Only orders whose status counts as sold contribute. Seat coordinates are
/// collected from both supported schemas (`items[].seat_info` and the
/// secondary `tickets[].seat_info`); GA quantities come from `items`.
#[must_use]
pub fn sales_from_orders(orders: &[Order]) -> SalesLedger {
    let mut ledger = SalesLedger::default();

    for order in orders {
        if !order.status.is_sold() {
            continue;
        }
        for item in &order.items {
            if let Some(seat) = &item.seat_info {
                ledger.seats.insert(seat.clone());
                continue;
            }
            if let Some(id) = &item.ticket_type {
                ledger.ga.push((id.clone(), item.quantity));
            }
            if let Some(name) = &item.tier_name {
                ledger.ga.push((name.clone(), item.quantity));
            }
        }
        // Secondary legacy schema: older orders carry seat info here.
        for ticket in &order.tickets {
            if let Some(seat) = &ticket.seat_info {
                ledger.seats.insert(seat.clone());
            }
        }
    }

    ledger
}

/// Folds holds into a [`HoldLedger`], lazily expiring against `now`.
#[must_use]
pub fn holds_at(holds: &[Hold], now: DateTime<Utc>) -> HoldLedger {
    let mut ledger = HoldLedger::default();

    for hold in holds {
        if !hold.is_active(now) {
            continue;
        }
        match &hold.target {
            HoldTarget::Tier { tier, quantity } => {
                ledger.ga.push((tier.clone(), *quantity));
            }
            HoldTarget::Seat(seat) => {
                ledger.seats.insert(seat.clone());
            }
        }
    }

    ledger
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{EventId, OrderItem, OrderStatus};

    fn order(status: OrderStatus, items: Vec<OrderItem>, tickets: Vec<OrderItem>) -> Order {
        Order {
            event_id: EventId::new("ev-1"),
            status,
            items,
            tickets,
        }
    }

    #[test]
    fn cancelled_orders_do_not_count() {
        let ledger = sales_from_orders(&[order(
            OrderStatus::Cancelled,
            vec![OrderItem::by_ticket_type("vip", 4)],
            vec![],
        )]);
        assert!(ledger.ga.is_empty());
    }

    #[test]
    fn both_legacy_fields_contribute() {
        let item = OrderItem {
            ticket_type: Some("vip".to_string()),
            tier_name: Some("VIP".to_string()),
            quantity: 2,
            seat_info: None,
        };
        let ledger = sales_from_orders(&[order(OrderStatus::Completed, vec![item], vec![])]);
        // One entry per populated field; the GA builder resolves both.
        assert_eq!(ledger.ga.len(), 2);
    }

    #[test]
    fn seats_come_from_both_schemas() {
        let ledger = sales_from_orders(&[order(
            OrderStatus::Confirmed,
            vec![OrderItem::for_seat(SeatKey::new("A", "1", "5"))],
            vec![OrderItem::for_seat(SeatKey::new("A", "1", "6"))],
        )]);
        assert!(ledger.seats.contains(&SeatKey::new("A", "1", "5")));
        assert!(ledger.seats.contains(&SeatKey::new("A", "1", "6")));
    }

    #[test]
    fn seat_items_do_not_leak_into_ga() {
        let mut item = OrderItem::for_seat(SeatKey::new("A", "1", "5"));
        item.ticket_type = Some("vip".to_string());
        let ledger = sales_from_orders(&[order(OrderStatus::Completed, vec![item], vec![])]);
        assert!(ledger.ga.is_empty());
        assert_eq!(ledger.seats.len(), 1);
    }

    #[test]
    fn expired_holds_are_dropped() {
        let now = Utc::now();
        let holds = vec![
            Hold {
                event_id: EventId::new("ev-1"),
                held_until: now + chrono::Duration::minutes(10),
                target: HoldTarget::Tier {
                    tier: "vip".to_string(),
                    quantity: 3,
                },
            },
            Hold {
                event_id: EventId::new("ev-1"),
                held_until: now - chrono::Duration::minutes(1),
                target: HoldTarget::Tier {
                    tier: "vip".to_string(),
                    quantity: 5,
                },
            },
        ];
        let ledger = holds_at(&holds, now);
        assert_eq!(ledger.ga, vec![("vip".to_string(), 3)]);
    }
}
