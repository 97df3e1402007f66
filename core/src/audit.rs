//! Audit log query model.
//!
//! Every mutating operation appends exactly one entry; this module covers
//! the read side. The backing store can only combine the event id with a
//! timestamp ordering in one query, so retrieval fetches the most recent
//! `limit` entries newest-first and applies any secondary filter in memory.
//! That shape is a store limitation the original system had, preserved here
//! so filter semantics and ordering stay identical.

use crate::types::{InventoryKind, InventoryLog, LogAction};
use chrono::{DateTime, Utc};

/// Default fetch window when the caller does not pass a limit.
pub const DEFAULT_LOG_LIMIT: usize = 50;

/// Secondary, in-memory filter for log retrieval.
#[derive(Clone, Debug, Default)]
pub struct LogFilter {
    /// Keep only entries recording this action.
    pub action: Option<LogAction>,
    /// Keep only entries concerning this inventory kind.
    pub kind: Option<InventoryKind>,
    /// Keep only entries performed by this actor.
    pub performed_by: Option<String>,
    /// Keep only entries at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Keep only entries at or before this instant.
    pub to: Option<DateTime<Utc>>,
}

impl LogFilter {
    /// Whether an entry passes every populated predicate.
    #[must_use]
    pub fn matches(&self, entry: &InventoryLog) -> bool {
        self.action.is_none_or(|a| entry.action == a)
            && self.kind.is_none_or(|k| entry.kind == k)
            && self
                .performed_by
                .as_ref()
                .is_none_or(|actor| entry.performed_by == *actor)
            && self.from.is_none_or(|from| entry.performed_at >= from)
            && self.to.is_none_or(|to| entry.performed_at <= to)
    }
}

/// Applies the secondary filter, preserving the newest-first order of the
/// fetched window.
#[must_use]
pub fn apply_filter(entries: Vec<InventoryLog>, filter: &LogFilter) -> Vec<InventoryLog> {
    entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{EventId, LogId};
    use chrono::Duration;

    fn entry(action: LogAction, actor: &str, minutes_ago: i64) -> InventoryLog {
        InventoryLog {
            id: LogId::new(),
            event_id: EventId::new("ev-1"),
            action,
            kind: InventoryKind::GeneralAdmission,
            quantity_change: 1,
            previous_value: None,
            new_value: None,
            reason: "test".to_string(),
            performed_by: actor.to_string(),
            performed_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let entries = vec![
            entry(LogAction::Block, "a", 0),
            entry(LogAction::Unblock, "b", 5),
        ];
        let out = apply_filter(entries.clone(), &LogFilter::default());
        assert_eq!(out, entries);
    }

    #[test]
    fn filters_by_action_actor_and_range() {
        let entries = vec![
            entry(LogAction::Block, "alice", 1),
            entry(LogAction::Block, "bob", 10),
            entry(LogAction::AddCapacity, "alice", 20),
        ];

        let by_action = apply_filter(
            entries.clone(),
            &LogFilter {
                action: Some(LogAction::Block),
                ..LogFilter::default()
            },
        );
        assert_eq!(by_action.len(), 2);

        let by_actor = apply_filter(
            entries.clone(),
            &LogFilter {
                performed_by: Some("alice".to_string()),
                ..LogFilter::default()
            },
        );
        assert_eq!(by_actor.len(), 2);

        let recent_only = apply_filter(
            entries,
            &LogFilter {
                from: Some(Utc::now() - Duration::minutes(15)),
                ..LogFilter::default()
            },
        );
        assert_eq!(recent_only.len(), 2);
    }
}
