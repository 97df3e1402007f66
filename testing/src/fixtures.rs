//! Builders and helpers for constructing domain records in tests.

use chrono::{DateTime, Duration, Utc};
use ticket_inventory_core::{
    EventConfig, EventId, Hold, HoldTarget, Layout, LayoutId, LayoutRow, LayoutSeat,
    LayoutSection, Money, Order, OrderItem, OrderStatus, PricingTierDef, SeatKey, TicketTypeDef,
    TierId,
};

/// Builder for [`EventConfig`] fixtures.
///
/// Defaults to a GA event with no tiers so tests only state what they care
/// about.
pub struct EventConfigBuilder {
    config: EventConfig,
}

impl EventConfigBuilder {
    /// Starts a config for the given event id.
    #[must_use]
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            config: EventConfig {
                id: EventId::new(event_id),
                seating_type: None,
                layout_type: None,
                layout_id: None,
                total_capacity: 0,
                ticket_types: Vec::new(),
                pricing_tiers: Vec::new(),
                sections: Vec::new(),
            },
        }
    }

    /// Sets the explicit seating-type flag.
    #[must_use]
    pub fn seating_type(mut self, value: impl Into<String>) -> Self {
        self.config.seating_type = Some(value.into());
        self
    }

    /// Sets the layout-type field.
    #[must_use]
    pub fn layout_type(mut self, value: impl Into<String>) -> Self {
        self.config.layout_type = Some(value.into());
        self
    }

    /// References a full layout document.
    #[must_use]
    pub fn layout_id(mut self, value: impl Into<String>) -> Self {
        self.config.layout_id = Some(LayoutId::new(value));
        self
    }

    /// Sets the flat declared capacity.
    #[must_use]
    pub const fn total_capacity(mut self, value: u32) -> Self {
        self.config.total_capacity = value;
        self
    }

    /// Adds an explicit ticket-type tier.
    #[must_use]
    pub fn ticket_type(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
    ) -> Self {
        self.config.ticket_types.push(TicketTypeDef {
            id: TierId::new(id),
            name: name.into(),
            capacity,
            price: None,
        });
        self
    }

    /// Adds a legacy pricing tier.
    #[must_use]
    pub fn pricing_tier(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
    ) -> Self {
        self.config.pricing_tiers.push(PricingTierDef {
            id: TierId::new(id),
            name: name.into(),
            capacity,
            price: None,
        });
        self
    }

    /// Adds a section to the event's lightweight snapshot.
    #[must_use]
    pub fn section(mut self, section: LayoutSection) -> Self {
        self.config.sections.push(section);
        self
    }

    /// Finishes the config.
    #[must_use]
    pub fn build(self) -> EventConfig {
        self.config
    }
}

/// A section of `rows × seats_per_row` seats, numbered "1"..="n", with an
/// optional section-level price.
#[must_use]
pub fn grid_section(
    name: impl Into<String>,
    rows: u32,
    seats_per_row: u32,
    price: Option<Money>,
) -> LayoutSection {
    let name = name.into();
    let rows = (1..=rows)
        .map(|r| LayoutRow {
            label: r.to_string(),
            price: None,
            category: None,
            seats: (1..=seats_per_row)
                .map(|s| LayoutSeat {
                    number: s.to_string(),
                    price: None,
                    category: None,
                })
                .collect(),
        })
        .collect();
    LayoutSection {
        id: name.to_lowercase(),
        name,
        capacity: None,
        price,
        category: None,
        rows,
    }
}

/// A capacity-only snapshot section carrying no row data.
#[must_use]
pub fn snapshot_section(name: impl Into<String>, capacity: u32) -> LayoutSection {
    let name = name.into();
    LayoutSection {
        id: name.to_lowercase(),
        name,
        capacity: Some(capacity),
        price: None,
        category: None,
        rows: Vec::new(),
    }
}

/// A layout document from the given sections.
#[must_use]
pub fn layout(id: impl Into<String>, sections: Vec<LayoutSection>) -> Layout {
    Layout {
        id: LayoutId::new(id),
        sections,
    }
}

/// A completed GA order referencing its tier by id.
#[must_use]
pub fn ga_order(event_id: impl Into<String>, ticket_type: impl Into<String>, quantity: u32) -> Order {
    Order {
        event_id: EventId::new(event_id),
        status: OrderStatus::Completed,
        items: vec![OrderItem::by_ticket_type(ticket_type, quantity)],
        tickets: Vec::new(),
    }
}

/// A completed reserved-seating order for the given seats.
#[must_use]
pub fn seat_order(event_id: impl Into<String>, seats: Vec<SeatKey>) -> Order {
    Order {
        event_id: EventId::new(event_id),
        status: OrderStatus::Completed,
        items: seats.into_iter().map(OrderItem::for_seat).collect(),
        tickets: Vec::new(),
    }
}

/// A tier hold that expires `minutes` after `now`.
#[must_use]
pub fn tier_hold(
    event_id: impl Into<String>,
    tier: impl Into<String>,
    quantity: u32,
    now: DateTime<Utc>,
    minutes: i64,
) -> Hold {
    Hold {
        event_id: EventId::new(event_id),
        held_until: now + Duration::minutes(minutes),
        target: HoldTarget::Tier {
            tier: tier.into(),
            quantity,
        },
    }
}

/// A seat hold that expires `minutes` after `now`.
#[must_use]
pub fn seat_hold(
    event_id: impl Into<String>,
    seat: SeatKey,
    now: DateTime<Utc>,
    minutes: i64,
) -> Hold {
    Hold {
        event_id: EventId::new(event_id),
        held_until: now + Duration::minutes(minutes),
        target: HoldTarget::Seat(seat),
    }
}
