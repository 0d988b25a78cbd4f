use hashbrown::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    api::ApiError,
    types::{OpKind, UserId},
    user::{QueryParams, QueryPatch, UserRecord},
    view::{filter, stats, stats::Statistics},
};

/// Failure from a direct collection mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this identifier is already present.
    #[error("user {0} already present")]
    AlreadyExists(UserId),
}

/// Loading flag plus error slot for one operation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpSlot {
    /// True while the operation is in flight.
    pub in_flight: bool,
    /// Classified failure from the most recent completed attempt.
    pub error: Option<ApiError>,
}

/// Independent loading/error slots, one per operation kind.
///
/// A failure of one kind never overwrites or masks another kind's slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationState {
    /// Collection load slot.
    pub load: OpSlot,
    /// Record creation slot.
    pub create: OpSlot,
    /// Record update slot.
    pub update: OpSlot,
    /// Record deletion slot.
    pub delete: OpSlot,
    /// Export slot.
    pub export: OpSlot,
}

impl OperationState {
    /// The slot tracking `kind`.
    pub fn slot(&self, kind: OpKind) -> &OpSlot {
        match kind {
            OpKind::Load => &self.load,
            OpKind::Create => &self.create,
            OpKind::Update => &self.update,
            OpKind::Delete => &self.delete,
            OpKind::Export => &self.export,
        }
    }

    fn slot_mut(&mut self, kind: OpKind) -> &mut OpSlot {
        match kind {
            OpKind::Load => &mut self.load,
            OpKind::Create => &mut self.create,
            OpKind::Update => &mut self.update,
            OpKind::Delete => &mut self.delete,
            OpKind::Export => &mut self.export,
        }
    }

    /// True when no operation of any kind is in flight.
    pub fn idle(&self) -> bool {
        !(self.load.in_flight
            || self.create.in_flight
            || self.update.in_flight
            || self.delete.in_flight
            || self.export.in_flight)
    }
}

/// Single source of truth for the collection, the active query parameters,
/// and per-operation state.
///
/// Order is server/insertion order; records are unique by identifier. All
/// mutation routes through this type; readers receive cloned snapshots.
#[derive(Debug, Default)]
pub struct UserStore {
    records: HashMap<UserId, UserRecord>,
    order: Vec<UserId>,
    query: QueryParams,
    ops: OperationState,
}

impl UserStore {
    /// Creates an empty store with idle operation state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Borrows a record by identifier.
    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.get(&id)
    }

    /// Clones a record by identifier.
    pub fn get_cloned(&self, id: UserId) -> Option<UserRecord> {
        self.get(id).cloned()
    }

    /// Clones the full collection in its canonical order.
    pub fn users(&self) -> Vec<UserRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    /// Derives the filtered/sorted view under the active query parameters.
    pub fn filtered(&self) -> Vec<UserRecord> {
        filter::derive(&self.users(), &self.query)
    }

    /// Derives aggregate statistics over the full collection.
    pub fn statistics(&self) -> Statistics {
        stats::derive(&self.users())
    }

    /// Borrows the active query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Borrows the per-operation state.
    pub fn operation_state(&self) -> &OperationState {
        &self.ops
    }

    /// Replaces the collection wholesale, keeping the given order.
    ///
    /// Uniqueness by identifier is enforced; a later duplicate is dropped.
    pub fn replace_all(&mut self, users: Vec<UserRecord>) {
        self.records.clear();
        self.order.clear();
        for user in users {
            if self.records.contains_key(&user.id) {
                debug!(id = user.id, "dropping duplicate id from load");
                continue;
            }
            self.order.push(user.id);
            self.records.insert(user.id, user);
        }
    }

    /// Appends a record, preserving existing order.
    pub fn insert(&mut self, user: UserRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&user.id) {
            return Err(StoreError::AlreadyExists(user.id));
        }
        self.order.push(user.id);
        self.records.insert(user.id, user);
        Ok(())
    }

    /// Replaces the record with a matching identifier in place, keeping its
    /// position. Local absence is a benign no-op: the canonical state is the
    /// server's. Returns whether a record was replaced.
    pub fn replace(&mut self, user: UserRecord) -> bool {
        match self.records.get_mut(&user.id) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => {
                debug!(id = user.id, "update target absent locally, ignoring");
                false
            }
        }
    }

    /// Removes the record with this identifier, if present. Returns whether a
    /// record was removed.
    pub fn remove(&mut self, id: UserId) -> bool {
        if self.records.remove(&id).is_none() {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|x| *x == id) {
            self.order.remove(pos);
        }
        true
    }

    /// Merges a patch into the query parameters; unspecified fields retain
    /// their previous value.
    pub fn set_query(&mut self, patch: &QueryPatch) {
        patch.apply_to(&mut self.query);
    }

    /// Resets the query parameters, making the filtered view equal to the
    /// full collection in its current order.
    pub fn clear_filters(&mut self) {
        self.query = QueryParams::default();
    }

    /// Restores the initial state: empty collection, default query, idle
    /// operation slots.
    pub fn reset(&mut self) {
        self.records.clear();
        self.order.clear();
        self.query = QueryParams::default();
        self.ops = OperationState::default();
    }

    /// Marks `kind` in flight and clears its error slot.
    pub fn begin(&mut self, kind: OpKind) {
        let slot = self.ops.slot_mut(kind);
        slot.in_flight = true;
        slot.error = None;
    }

    /// Marks `kind` finished without error.
    pub fn succeed(&mut self, kind: OpKind) {
        self.ops.slot_mut(kind).in_flight = false;
    }

    /// Marks `kind` finished and records its classified error. Only the slot
    /// for `kind` is touched.
    pub fn fail(&mut self, kind: OpKind, error: ApiError) {
        debug!(?kind, %error, "operation failed");
        let slot = self.ops.slot_mut(kind);
        slot.in_flight = false;
        slot.error = Some(error);
    }
}
