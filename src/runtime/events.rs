//! Runtime event stream payloads.

use crate::types::{OpKind, UserId};

/// Events emitted from the single-writer state loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// The collection was replaced from a successful load.
    Loaded {
        /// Number of records now held.
        count: usize,
    },
    /// A new record was appended.
    Created {
        /// Server-assigned identifier.
        id: UserId,
    },
    /// An existing record was replaced in place.
    Updated {
        /// Identifier of the replaced record.
        id: UserId,
    },
    /// A record was removed.
    Deleted {
        /// Identifier of the removed record.
        id: UserId,
    },
    /// Query parameters changed; the filtered view derives differently now.
    QueryChanged,
    /// An operation failed; the error is recorded in that kind's slot.
    Failed {
        /// Kind whose slot holds the error.
        kind: OpKind,
    },
}
