//! String and column codecs for the enums persisted by this crate.
//!
//! The canonical string forms live on the core enums (`as_str`); this module
//! adds the parsing direction, which only the database layer needs.

use ticket_inventory_core::{BlockStatus, InventoryKind, LogAction, StoreError};

/// Database string form of a block status.
#[must_use]
pub const fn status_as_str(status: BlockStatus) -> &'static str {
    match status {
        BlockStatus::Active => "active",
        BlockStatus::Released => "released",
    }
}

/// Parse a block status from its database string.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] if the string is not a known status.
pub fn parse_status(s: &str) -> Result<BlockStatus, StoreError> {
    match s {
        "active" => Ok(BlockStatus::Active),
        "released" => Ok(BlockStatus::Released),
        _ => Err(StoreError::Serialization(format!(
            "invalid block status: {s}"
        ))),
    }
}

/// Parse a log action from its database string.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] if the string is not a known action.
pub fn parse_action(s: &str) -> Result<LogAction, StoreError> {
    match s {
        "block" => Ok(LogAction::Block),
        "bulk_block" => Ok(LogAction::BulkBlock),
        "unblock" => Ok(LogAction::Unblock),
        "add_capacity" => Ok(LogAction::AddCapacity),
        "remove_capacity" => Ok(LogAction::RemoveCapacity),
        _ => Err(StoreError::Serialization(format!(
            "invalid log action: {s}"
        ))),
    }
}

/// Parse an inventory kind from its database string.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] if the string is not a known kind.
pub fn parse_kind(s: &str) -> Result<InventoryKind, StoreError> {
    match s {
        "ga" => Ok(InventoryKind::GeneralAdmission),
        "reserved" => Ok(InventoryKind::Reserved),
        _ => Err(StoreError::Serialization(format!(
            "invalid inventory kind: {s}"
        ))),
    }
}

/// Convert a persisted quantity column back to the in-memory width.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] on negative or oversized values.
pub fn parse_quantity(value: i64) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::Serialization(format!("invalid quantity: {value}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in [BlockStatus::Active, BlockStatus::Released] {
            let parsed = parse_status(status_as_str(status)).expect("valid status should parse");
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn action_roundtrip() {
        for action in [
            LogAction::Block,
            LogAction::BulkBlock,
            LogAction::Unblock,
            LogAction::AddCapacity,
            LogAction::RemoveCapacity,
        ] {
            let parsed = parse_action(action.as_str()).expect("valid action should parse");
            assert_eq!(action, parsed);
        }
    }

    #[test]
    fn kind_roundtrip() {
        for kind in [InventoryKind::GeneralAdmission, InventoryKind::Reserved] {
            let parsed = parse_kind(kind.as_str()).expect("valid kind should parse");
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!(parse_status("pending").is_err());
        assert!(parse_action("delete").is_err());
        assert!(parse_kind("hybrid").is_err());
    }

    #[test]
    fn negative_quantities_are_rejected() {
        assert!(parse_quantity(-1).is_err());
        assert_eq!(parse_quantity(40).unwrap(), 40);
    }
}
