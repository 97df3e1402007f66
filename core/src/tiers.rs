//! Canonical tier catalog with alias resolution.
//!
//! GA tiers arrive from two legacy sources on the event configuration (the
//! explicit ticket-type list and the pricing-tier list), and order line
//! items reference tiers by display name rather than id. This module models
//! that dual keyspace explicitly: one canonical `tier_id → definition` map
//! plus a case-insensitive `name → id` alias resolver, isolating upstream
//! naming drift from the reconciliation core.

use crate::types::{EventConfig, TierId};
use std::collections::HashMap;

/// Canonical definition of one GA tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierDef {
    /// Display name.
    pub name: String,
    /// Declared capacity.
    pub capacity: u32,
}

/// Merged, deduplicated view of an event's GA tiers.
#[derive(Clone, Debug, Default)]
pub struct TierCatalog {
    /// Canonical ids in declaration order (ticket types first).
    order: Vec<TierId>,
    defs: HashMap<TierId, TierDef>,
    /// Lowercased display name → canonical id.
    aliases: HashMap<String, TierId>,
    synthesized: bool,
}

/// Tier id and display name of the tier synthesized from an event's flat
/// capacity when no tiers are configured.
pub const SYNTHESIZED_TIER_ID: &str = "general";

impl TierCatalog {
    /// Builds the catalog from an event configuration.
    ///
    /// Merges both legacy tier sources, deduplicating by id with the
    /// ticket-type definition winning on conflict. If neither source
    /// declares a tier, synthesizes one `general` tier from the event's
    /// flat capacity.
    #[must_use]
    pub fn from_config(config: &EventConfig) -> Self {
        let mut catalog = Self::default();

        for tt in &config.ticket_types {
            catalog.insert(
                tt.id.clone(),
                TierDef {
                    name: tt.name.clone(),
                    capacity: tt.capacity,
                },
            );
        }
        for pt in &config.pricing_tiers {
            // Ticket-type definitions win on id conflict.
            if !catalog.defs.contains_key(&pt.id) {
                catalog.insert(
                    pt.id.clone(),
                    TierDef {
                        name: pt.name.clone(),
                        capacity: pt.capacity,
                    },
                );
            }
        }

        if catalog.order.is_empty() {
            catalog.insert(
                TierId::new(SYNTHESIZED_TIER_ID),
                TierDef {
                    name: "General".to_string(),
                    capacity: config.total_capacity,
                },
            );
            catalog.synthesized = true;
        }

        catalog
    }

    fn insert(&mut self, id: TierId, def: TierDef) {
        // First writer wins for the alias too, so a pricing-tier name never
        // shadows a ticket-type name.
        self.aliases
            .entry(def.name.to_lowercase())
            .or_insert_with(|| id.clone());
        self.order.push(id.clone());
        self.defs.insert(id, def);
    }

    /// Resolves an order/hold label to a canonical tier id.
    ///
    /// Display names match case-insensitively; a label that matches no
    /// alias falls back to the literal label as a synthetic id (which may
    /// or may not name a configured tier).
    #[must_use]
    pub fn resolve(&self, label: &str) -> TierId {
        self.aliases
            .get(&label.to_lowercase())
            .cloned()
            .unwrap_or_else(|| TierId::new(label))
    }

    /// Looks up a canonical definition.
    #[must_use]
    pub fn get(&self, id: &TierId) -> Option<&TierDef> {
        self.defs.get(id)
    }

    /// Whether the catalog holds any configured tier for this id.
    #[must_use]
    pub fn contains(&self, id: &TierId) -> bool {
        self.defs.contains_key(id)
    }

    /// Canonical tiers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&TierId, &TierDef)> {
        self.order.iter().filter_map(|id| {
            self.defs.get(id).map(|def| (id, def))
        })
    }

    /// Whether the single `general` tier was synthesized from flat capacity.
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.synthesized
    }
}
