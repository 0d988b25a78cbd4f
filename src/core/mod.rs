//! In-memory authoritative store and operation state.

/// Authoritative user store, query parameters, and per-operation slots.
pub mod store;
