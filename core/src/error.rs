//! Error taxonomy for the reconciliation core.
//!
//! Two layers, matching how failures surface:
//!
//! - [`StoreError`]: infrastructure failure in an underlying store. The
//!   pure-read path (`get_summary`) lets these propagate to the caller
//!   unmodified.
//! - [`InventoryError`]: the full domain taxonomy. Mutating operations catch
//!   every variant and normalize it into a failed outcome with a
//!   human-readable message carrying the concrete violated numbers.

use crate::types::InventoryKind;
use thiserror::Error;

/// Infrastructure failure in an underlying data store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or the call failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Domain errors raised by inventory operations.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// An event, block, or tier the operation needs does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The request violates an inventory invariant. The message embeds the
    /// violated numbers (floor, available count, offending seats) so callers
    /// can render it without further interpretation.
    #[error("{0}")]
    Validation(String),

    /// The operation targeted a block of the wrong kind.
    #[error("block is a {actual} block, expected {expected}")]
    TypeMismatch {
        /// The kind the operation requires.
        expected: InventoryKind,
        /// The kind the block actually has.
        actual: InventoryKind,
    },

    /// An underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    /// Builds a not-found error for a named entity.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Builds a validation error from a preformatted message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
